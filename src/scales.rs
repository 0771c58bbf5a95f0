// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale markers used by the sky engine.
//!
//! | Marker | Axis | Used for |
//! |--------|------|----------|
//! | [`JD`] | Julian Day on TT | ephemeris arguments |
//! | [`UT`] | Julian Day on UT | clock input, sidereal time |

use super::instant::{Time, TimeScale};
use qtty::{Day, Days, Simplify};

/// Julian Date on the uniform TT axis; the identity scale.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JD;

impl TimeScale for JD {
    const LABEL: &'static str = "Julian Day:";

    #[inline(always)]
    fn to_jd_tt(value: Days) -> Days {
        value
    }

    #[inline(always)]
    fn from_jd_tt(jd_tt: Days) -> Days {
        jd_tt
    }
}

/// Universal Time: Julian Day on the Earth-rotation axis.
///
/// Converting to [`JD`] adds ΔT (see [`crate::delta_t`]); the inverse is a
/// three step fixed-point iteration, which converges immediately because
/// dΔT/dJD is of order 1e-8.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const LABEL: &'static str = "UT";

    #[inline]
    fn to_jd_tt(ut_value: Days) -> Days {
        let dt = super::delta_t::delta_t_seconds(Time::<UT>::from_days(ut_value));
        ut_value + dt.to::<Day>()
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        let mut ut = jd_tt;
        for _ in 0..3 {
            let dt = super::delta_t::delta_t_seconds(Time::<UT>::from_days(ut));
            ut = jd_tt - dt.to::<Day>();
        }
        ut
    }
}

impl From<Time<UT>> for Time<JD> {
    #[inline]
    fn from(t: Time<UT>) -> Self {
        t.to::<JD>()
    }
}

impl From<Time<JD>> for Time<UT> {
    #[inline]
    fn from(t: Time<JD>) -> Self {
        t.to::<UT>()
    }
}

impl<S: TimeScale> Time<S> {
    /// J2000.0 epoch on this scale's day count (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// Days elapsed since J2000.0 on this scale.
    #[inline]
    pub fn days_since_j2000(&self) -> Days {
        *self - Self::J2000
    }

    /// Julian centuries since J2000.0 on this scale.
    ///
    /// Ephemeris arguments take this on `Time<JD>`; sidereal time takes it on
    /// `Time<UT>`.
    #[inline]
    pub fn julian_centuries(&self) -> f64 {
        (self.days_since_j2000() / Self::JULIAN_CENTURY)
            .simplify()
            .value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::{Second, Seconds};

    #[test]
    fn ut_to_jd_applies_delta_t() {
        let ut = Time::<UT>::new(2_451_545.0);
        let jd: Time<JD> = ut.to::<JD>();
        let offset = (jd.quantity() - ut.quantity()).to::<Second>();
        assert!(
            (offset - Seconds::new(63.86)).abs() < Seconds::new(0.5),
            "UT→JD offset = {offset}"
        );
    }

    #[test]
    fn ut_jd_roundtrip() {
        let jd = Time::<JD>::new(2_460_000.25);
        let ut: Time<UT> = jd.into();
        let back: Time<JD> = ut.into();
        assert!((back.quantity() - jd.quantity()).abs() < Days::new(1e-12));
    }

    #[test]
    fn julian_centuries_at_epochs() {
        assert_eq!(Time::<JD>::J2000.julian_centuries(), 0.0);
        let t = Time::<JD>::J2000 + Days::new(36_525.0 * 2.0);
        assert!((t.julian_centuries() - 2.0).abs() < 1e-12);
        let back = Time::<UT>::J2000 - Days::new(36_525.0);
        assert!((back.julian_centuries() + 1.0).abs() < 1e-12);
    }
}
