// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Low-accuracy ephemeris from the Astronomical Almanac's short formulas.
//!
//! A handful of periodic terms per body; the moon is geocentric.  Cheap
//! enough to evaluate many times per frame.

use super::{ecliptic_to_equatorial, BodyPosition, EphemerisAlgorithm, ValidityWindow, ASTRONOMICAL_UNIT_KM};
use crate::angles::{rad, wrap_360};
use crate::instant::Time;
use crate::observer::Location;
use crate::scales::{JD, UT};

const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.14;

/// Astronomical Almanac low-precision sun and moon, valid 1950–2050.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct LowAccuracyEphemeris;

impl LowAccuracyEphemeris {
    pub const NAME: &'static str = "low";

    /// 1950-01-01 0h to 2050-01-01 0h UT.
    pub const VALIDITY: ValidityWindow =
        ValidityWindow::new(Time::<UT>::new(2_433_282.5), Time::<UT>::new(2_469_807.5));

    pub const fn new() -> Self {
        Self
    }
}

/// Obliquity used by both bodies, `d` in days from J2000 TT.
fn obliquity(d: f64) -> f64 {
    23.439 - 0.000_000_4 * d
}

impl EphemerisAlgorithm for LowAccuracyEphemeris {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validity(&self) -> ValidityWindow {
        Self::VALIDITY
    }

    fn sun(&self, t: Time<UT>, _location: &Location) -> BodyPosition {
        let d = t.to::<JD>().days_since_j2000().value();
        let l = 280.460 + 0.985_647_4 * d;
        let g = rad(357.528 + 0.985_600_3 * d);
        let lambda = wrap_360(l + 1.915 * g.sin() + 0.020 * (2.0 * g).sin());
        let r_au = 1.000_14 - 0.016_71 * g.cos() - 0.000_14 * (2.0 * g).cos();
        BodyPosition {
            direction: ecliptic_to_equatorial(lambda, 0.0, obliquity(d)),
            distance_km: r_au * ASTRONOMICAL_UNIT_KM,
        }
    }

    fn moon(&self, t: Time<UT>, _location: &Location) -> BodyPosition {
        let tt = t.to::<JD>();
        let c = tt.julian_centuries();
        let term = |a: f64, b: f64| rad(a + b * c);

        let lambda = 218.32 + 481_267.881 * c
            + 6.29 * term(135.0, 477_198.87).sin()
            - 1.27 * term(259.3, -413_335.36).sin()
            + 0.66 * term(235.7, 890_534.22).sin()
            + 0.21 * term(269.9, 954_397.74).sin()
            - 0.19 * term(357.5, 35_999.05).sin()
            - 0.11 * term(186.5, 966_404.03).sin();
        let beta = 5.13 * term(93.3, 483_202.02).sin()
            + 0.28 * term(228.2, 960_400.89).sin()
            - 0.28 * term(318.3, 6_003.15).sin()
            - 0.17 * term(217.6, -407_332.21).sin();
        let parallax = 0.950_8
            + 0.051_8 * term(135.0, 477_198.87).cos()
            + 0.009_5 * term(259.3, -413_335.36).cos()
            + 0.007_8 * term(235.7, 890_534.22).cos()
            + 0.002_8 * term(269.9, 954_397.74).cos();

        BodyPosition {
            direction: ecliptic_to_equatorial(
                lambda,
                beta,
                obliquity(tt.days_since_j2000().value()),
            ),
            distance_km: EARTH_EQUATORIAL_RADIUS_KM / parallax.to_radians().sin(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::{Body, StandardEphemeris};
    use qtty::{Days, Degree};

    fn sample_times() -> impl Iterator<Item = Time<UT>> {
        let start = crate::calendar::CalendarMoment::date(2024, 1, 1).to_astronomical_time();
        (0..366).map(move |day| start + Days::new(f64::from(day)))
    }

    #[test]
    fn sun_agrees_with_standard_tier() {
        let loc = Location::default();
        for t in sample_times().step_by(7) {
            let low = LowAccuracyEphemeris.sun_direction(t, &loc);
            let std = StandardEphemeris.sun_direction(t, &loc);
            let sep = low.angle_to(&std).to_degrees();
            assert!(sep < 0.05, "{t}: {sep}°");
        }
    }

    #[test]
    fn geocentric_moon_agrees_with_standard_tier() {
        // Observer at the geocentre is not expressible; compare against the
        // standard tier's geocentric series instead.
        for t in sample_times().step_by(5) {
            let low = LowAccuracyEphemeris.moon_direction(t, &Location::default());
            let c = t.to::<JD>().julian_centuries();
            let geo = crate::ephemeris::standard::lunar_position(c);
            let std = ecliptic_to_equatorial(geo.longitude, geo.latitude, geo.obliquity);
            let sep = low.angle_to(&std).to_degrees();
            assert!(sep < 0.6, "{t}: {sep}°");
        }
    }

    #[test]
    fn moon_is_geocentric() {
        let t = Time::<UT>::new(2_460_100.25);
        let a = LowAccuracyEphemeris.moon_direction(t, &Location::from_degrees(60.0, 10.0));
        let b = LowAccuracyEphemeris.moon_direction(t, &Location::from_degrees(-60.0, -120.0));
        assert_eq!(a, b);
    }

    #[test]
    fn angular_radii_stay_physical_over_a_year() {
        let loc = Location::default();
        for t in sample_times() {
            let sun = LowAccuracyEphemeris.angular_radius(Body::Sun, t, &loc).to::<Degree>().value();
            let moon = LowAccuracyEphemeris.angular_radius(Body::Moon, t, &loc).to::<Degree>().value();
            assert!((0.25..=0.28).contains(&sun), "{t}: sun {sun}");
            assert!((0.24..=0.28).contains(&moon), "{t}: moon {moon}");
        }
    }

    #[test]
    fn validity_is_narrower_than_standard() {
        let low = LowAccuracyEphemeris.validity();
        let std = StandardEphemeris.validity();
        assert!(low.start > std.start && low.end < std.end);
    }
}
