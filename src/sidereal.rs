// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sidereal time.
//!
//! Greenwich mean sidereal time from Meeus eq. 12.4 (IAU 1982), evaluated on
//! the UT axis.  Apparent sidereal time adds the equation of the equinoxes,
//! which puts it on the true equator of date like the equatorial frame.
//! Local sidereal time is apparent and adds the observer's east longitude.
//! All are returned in degrees, normalised into `[0, 360)`.

use qtty::{Days, Degrees};

use crate::angles::wrap_360;
use crate::ephemeris::{mean_obliquity, nutation};
use crate::instant::Time;
use crate::scales::{JD, UT};

/// Sidereal rotation in degrees per UT day (Meeus 12.4, linear term).
pub const SIDEREAL_RATE_DEG_PER_DAY: f64 = 360.985_647_366_29;

/// Length of one mean sidereal day expressed in UT days.
pub const SIDEREAL_DAY: Days = Days::new(360.0 / SIDEREAL_RATE_DEG_PER_DAY);

/// Greenwich mean sidereal time in `[0, 360)`.
pub fn greenwich_mean_sidereal_time(t: Time<UT>) -> Degrees {
    let d = t.days_since_j2000().value();
    let c = t.julian_centuries();
    // Split the linear term so the whole-turn part never costs precision.
    let turns = 360.0 * d.fract() + (SIDEREAL_RATE_DEG_PER_DAY - 360.0) * d;
    let theta = 280.460_618_37 + turns + c * c * (0.000_387_933 - c / 38_710_000.0);
    Degrees::new(wrap_360(theta))
}

/// Nutation in right ascension (Δψ cos ε), degrees.
pub(crate) fn equation_of_the_equinoxes(t: Time<UT>) -> f64 {
    let c = t.to::<JD>().julian_centuries();
    let (dpsi, deps) = nutation(c);
    dpsi * (mean_obliquity(c) + deps).to_radians().cos()
}

/// Greenwich apparent sidereal time in `[0, 360)`.
pub fn greenwich_apparent_sidereal_time(t: Time<UT>) -> Degrees {
    Degrees::new(wrap_360(
        greenwich_mean_sidereal_time(t).value() + equation_of_the_equinoxes(t),
    ))
}

/// Local apparent sidereal time in `[0, 360)` for an east-positive longitude.
pub fn local_sidereal_time(t: Time<UT>, longitude: Degrees) -> Degrees {
    Degrees::new(wrap_360(
        greenwich_apparent_sidereal_time(t).value() + longitude.value(),
    ))
}
