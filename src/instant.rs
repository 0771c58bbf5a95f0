// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scale-tagged instants.
//!
//! [`Time<S>`] stores a single [`Days`] quantity whose meaning is fixed at
//! compile time by the marker `S: TimeScale`.  The sky engine only needs two
//! axes:
//!
//! * [`UT`](crate::UT): Julian Day on the Earth-rotation axis.  This is what a
//!   wall clock produces and what sidereal time is defined on, so it is the
//!   *astronomical time* the engine is driven with.
//! * [`JD`](crate::JD): Julian Day on the uniform TT axis, used by the
//!   ephemeris formulas.
//!
//! Conversion between them goes through [`Time::to`], which applies ΔT.

use chrono::{DateTime, Utc};
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// JD of the Unix epoch (1970-01-01T00:00:00Z) on the UT axis.
pub(crate) const UNIX_EPOCH_JD: Days = Days::new(2_440_587.5);

// ═══════════════════════════════════════════════════════════════════════════
// TimeScale trait
// ═══════════════════════════════════════════════════════════════════════════

/// Marker trait for time scales.
///
/// Every scale knows how to map its native day count to and from the
/// canonical **Julian Date in TT**.  Pure epoch counters fold into a constant
/// offset; [`UT`](crate::UT) adds the epoch dependent ΔT.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    /// Display label used by [`Time`] formatting.
    const LABEL: &'static str;

    /// Convert a quantity in this scale's native unit to an absolute JD(TT).
    fn to_jd_tt(value: Days) -> Days;

    /// Convert an absolute JD(TT) back to this scale's native quantity.
    fn from_jd_tt(jd_tt: Days) -> Days;
}

// ═══════════════════════════════════════════════════════════════════════════
// Time<S>
// ═══════════════════════════════════════════════════════════════════════════

/// A point on time scale `S`.
///
/// `Time<S>` is layout-identical to a single `f64`; two instants built from
/// the same inputs compare bit-identical, which the engine relies on for its
/// cache check.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

impl<S: TimeScale> Time<S> {
    /// Create from a raw scalar (days since the scale's epoch).
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Absolute Julian Day (TT) corresponding to this instant.
    #[inline]
    pub fn julian_day(&self) -> Days {
        S::to_jd_tt(self.quantity)
    }

    /// Build an instant from an absolute Julian Day (TT).
    #[inline]
    pub fn from_julian_day(jd: Days) -> Self {
        Self::from_days(S::from_jd_tt(jd))
    }

    /// Convert this instant to another time scale through JD(TT).
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_julian_day(S::to_jd_tt(self.quantity))
    }

    /// Build an instant from a UTC timestamp.
    ///
    /// The timestamp is read as Universal Time and routed through
    /// [`UT`](crate::UT), so TT based scales receive the ΔT correction.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        use crate::scales::UT;
        let seconds = Seconds::new(datetime.timestamp() as f64)
            + Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        Time::<UT>::from_days(UNIX_EPOCH_JD + seconds.to::<Day>()).to::<S>()
    }

    /// Convert back to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        use crate::scales::UT;
        let jd_ut = self.to::<UT>().quantity();
        let seconds = (jd_ut - UNIX_EPOCH_JD).to::<Second>().value();
        if !seconds.is_finite() {
            return None;
        }
        let secs = seconds.floor() as i64;
        let nanos = ((seconds - secs as f64) * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos.min(999_999_999))
    }
}

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        f64::deserialize(deserializer).map(Self::new)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> AddAssign<Days> for Time<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity += rhs;
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> SubAssign<Days> for Time<S> {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.quantity -= rhs;
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

impl<S: TimeScale> From<Days> for Time<S> {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scales::{JD, UT};
    use chrono::TimeZone;

    #[test]
    fn test_creation_and_accessors() {
        let t = Time::<UT>::new(2_451_545.0);
        assert_eq!(t.quantity(), Days::new(2_451_545.0));
        assert_eq!(t.value(), 2_451_545.0);
    }

    #[test]
    fn test_from_utc_lands_on_j2000_for_ut() {
        let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let ut = Time::<UT>::from_utc(noon);
        assert!((ut.value() - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_utc_applies_delta_t_for_tt() {
        let noon = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = Time::<JD>::from_utc(noon);
        let offset = (jd.quantity() - Days::new(2_451_545.0)).to::<Second>();
        assert!(
            (offset - Seconds::new(63.8)).abs() < Seconds::new(1.0),
            "ΔT correction = {offset}"
        );
    }

    #[test]
    fn test_utc_roundtrip() {
        let dt = Utc.with_ymd_and_hms(2024, 6, 21, 3, 15, 30).unwrap();
        let jd = Time::<JD>::from_utc(dt);
        let back = jd.to_utc().expect("to_utc");
        let delta_ns = back.timestamp_nanos_opt().unwrap() - dt.timestamp_nanos_opt().unwrap();
        assert!(delta_ns.abs() < 100_000, "roundtrip error: {delta_ns} ns");
    }

    #[test]
    fn test_to_utc_rejects_non_finite() {
        assert!(Time::<UT>::new(f64::NAN).to_utc().is_none());
    }

    #[test]
    fn test_arithmetic() {
        let mut t = Time::<UT>::new(2_451_545.0);
        t += Days::new(1.0);
        assert_eq!(t.quantity(), Days::new(2_451_546.0));
        t -= Days::new(0.5);
        assert_eq!(t.quantity(), Days::new(2_451_545.5));
        let later = t + Days::new(2.0);
        assert_eq!(later - t, Days::new(2.0));
        assert_eq!((later - Days::new(2.0)).quantity(), t.quantity());
        assert!(t < later);
    }

    #[test]
    fn test_display_uses_scale_label() {
        let s = format!("{}", Time::<UT>::new(2_451_545.0));
        assert!(s.starts_with("UT"));
    }
}
