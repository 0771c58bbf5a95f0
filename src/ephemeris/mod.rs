// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sun and moon ephemerides.
//!
//! [`EphemerisAlgorithm`] is the seam the [`Astronomy`](crate::Astronomy)
//! engine composes over.  Implementations only have to provide the apparent
//! direction and geocentric distance of both bodies; directions, angular
//! radii, lunar orientation and earthshine are derived by provided methods
//! that every tier shares.
//!
//! | Tier | Type | Declared validity | Accuracy |
//! |------|------|-------------------|----------|
//! | standard | [`StandardEphemeris`] | 1900–2100 | sun ≈ 0.01°, moon ≈ 0.05°, topocentric |
//! | low | [`LowAccuracyEphemeris`] | 1950–2050 | sun ≈ 0.05°, moon ≈ 0.5°, geocentric |
//!
//! Outside the declared window results degrade smoothly; nothing fails.

mod any;
mod low;
mod standard;

pub use any::AnyEphemeris;
pub use low::LowAccuracyEphemeris;
pub use standard::StandardEphemeris;

use nalgebra::{Matrix3, Rotation3};
use qtty::{Degrees, Radians};
use std::f64::consts::PI;

use crate::angles::{degrees_to_radians, rad, wrap_360};
use crate::frames::{Direction, Equatorial, DEGENERATE_NORM};
use crate::instant::Time;
use crate::observer::Location;
use crate::scales::{JD, UT};

/// One astronomical unit in kilometres.
pub const ASTRONOMICAL_UNIT_KM: f64 = 149_597_870.7;
/// Mean solar radius in kilometres.
pub const SUN_RADIUS_KM: f64 = 696_000.0;
/// Mean lunar radius in kilometres.
pub const MOON_RADIUS_KM: f64 = 1_737.4;

/// Smallest distance accepted when deriving an angular radius.
const MIN_DISTANCE_KM: f64 = 1.0;

/// Largest value of the earthshine law (new moon).
const EARTHSHINE_PEAK: f64 = 0.19 * 0.5;

/// A body the engine tracks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Body {
    Sun,
    Moon,
}

/// Apparent direction plus geocentric distance of a body.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BodyPosition {
    /// Apparent direction as seen by the observer.
    pub direction: Direction<Equatorial>,
    /// Geocentric distance in kilometres.
    pub distance_km: f64,
}

/// Range of astronomical time over which a tier meets its stated accuracy.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ValidityWindow {
    pub start: Time<UT>,
    pub end: Time<UT>,
}

impl ValidityWindow {
    pub const fn new(start: Time<UT>, end: Time<UT>) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn contains(&self, t: Time<UT>) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Position model for the sun and moon.
///
/// All inputs are the engine snapshot (time on the UT axis, observer
/// location); implementations convert to TT themselves.  Methods must be
/// closed form: no unbounded iteration.
pub trait EphemerisAlgorithm {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Interval over which the declared accuracy holds.
    fn validity(&self) -> ValidityWindow;

    /// Apparent sun position.
    fn sun(&self, t: Time<UT>, location: &Location) -> BodyPosition;

    /// Apparent moon position.
    fn moon(&self, t: Time<UT>, location: &Location) -> BodyPosition;

    /// Unit vector towards the sun, equatorial frame.
    fn sun_direction(&self, t: Time<UT>, location: &Location) -> Direction<Equatorial> {
        self.sun(t, location).direction
    }

    /// Unit vector towards the moon, equatorial frame.
    fn moon_direction(&self, t: Time<UT>, location: &Location) -> Direction<Equatorial> {
        self.moon(t, location).direction
    }

    /// Apparent angular radius (half-angle) of `body`.
    fn angular_radius(&self, body: Body, t: Time<UT>, location: &Location) -> Radians {
        let position = match body {
            Body::Sun => self.sun(t, location),
            Body::Moon => self.moon(t, location),
        };
        self.angular_radius_of(body, &position)
    }

    /// Angular radius of `body` from an already evaluated position.
    fn angular_radius_of(&self, body: Body, position: &BodyPosition) -> Radians {
        match body {
            Body::Sun => sun_angular_radius(position.distance_km),
            Body::Moon => moon_angular_radius(position.distance_km),
        }
    }

    /// Orientation of the lunar disc for a given moon direction.
    fn moon_orientation(&self, t: Time<UT>, moon: &Direction<Equatorial>) -> Rotation3<f64> {
        moon_orientation(t.to::<JD>(), moon)
    }

    /// Earthshine on the moon's dark limb for given sun and moon directions.
    fn earthshine_intensity(&self, sun: &Direction<Equatorial>, moon: &Direction<Equatorial>) -> f64 {
        earthshine_intensity(sun, moon)
    }
}

// ── Shared spherical astronomy ───────────────────────────────────────────

/// Mean obliquity of the ecliptic in degrees (Meeus eq. 22.2).
pub(crate) fn mean_obliquity(t: f64) -> f64 {
    23.439_291_111 - 0.013_004_167 * t - 1.639e-7 * t * t + 5.036e-7 * t * t * t
}

/// Low-precision nutation in longitude and obliquity, degrees (Meeus ch. 22).
pub(crate) fn nutation(t: f64) -> (f64, f64) {
    let omega = rad(125.044_52 - 1_934.136_261 * t);
    let l_sun = rad(280.466_5 + 36_000.769_8 * t);
    let l_moon = rad(218.316_5 + 481_267.881_3 * t);
    let dpsi = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin() - 0.23 * (2.0 * l_moon).sin()
        + 0.21 * (2.0 * omega).sin();
    let deps = 9.20 * omega.cos() + 0.57 * (2.0 * l_sun).cos() + 0.10 * (2.0 * l_moon).cos()
        - 0.09 * (2.0 * omega).cos();
    (dpsi / 3_600.0, deps / 3_600.0)
}

/// Ecliptic longitude/latitude (degrees) to an equatorial direction.
///
/// Longitude is normalised into `[0, 360)` before use.
pub(crate) fn ecliptic_to_equatorial(lambda: f64, beta: f64, obliquity: f64) -> Direction<Equatorial> {
    let (sl, cl) = rad(lambda).sin_cos();
    let (sb, cb) = beta.to_radians().sin_cos();
    let (se, ce) = obliquity.to_radians().sin_cos();
    Direction::new_or_pole(nalgebra::Vector3::new(
        cb * cl,
        cb * sl * ce - sb * se,
        cb * sl * se + sb * ce,
    ))
}

/// Sun angular radius from its geocentric distance.
pub(crate) fn sun_angular_radius(distance_km: f64) -> Radians {
    Radians::new((SUN_RADIUS_KM / distance_km.max(MIN_DISTANCE_KM)).atan())
}

/// Moon angular radius from its geocentric distance.
pub(crate) fn moon_angular_radius(distance_km: f64) -> Radians {
    let ratio = (MOON_RADIUS_KM / distance_km.max(MIN_DISTANCE_KM)).min(1.0);
    Radians::new(ratio.asin())
}

/// IAU (WGCCRE 2009) lunar north pole, main nodal terms only.
///
/// Returns right ascension and declination in degrees on the J2000 equator;
/// precession to the equator of date is below a degree for this tier's
/// windows and is ignored.
pub(crate) fn lunar_pole(jd_tt: Time<JD>) -> (Degrees, Degrees) {
    let d = jd_tt.days_since_j2000().value();
    let t = jd_tt.julian_centuries();
    let e1 = rad(125.045 - 0.052_992_1 * d);
    let e2 = rad(250.089 - 0.105_984_2 * d);
    let e3 = rad(260.008 + 13.012_000_9 * d);
    let alpha = 269.994_9 + 0.003_1 * t - 3.878_7 * e1.sin() - 0.120_4 * e2.sin() + 0.070_0 * e3.sin();
    let delta = 66.539_2 + 0.013_0 * t + 1.541_9 * e1.cos() + 0.023_9 * e2.cos() - 0.027_8 * e3.cos();
    (Degrees::new(wrap_360(alpha)), Degrees::new(delta))
}

/// Orientation of the lunar disc.
///
/// Columns of the returned rotation are, in equatorial coordinates, the
/// disc's east, north and near-side (towards the observer) axes, so moon
/// local coordinates map straight into the equatorial frame.  A moon
/// direction parallel to the lunar pole yields the identity.
pub(crate) fn moon_orientation(jd_tt: Time<JD>, moon: &Direction<Equatorial>) -> Rotation3<f64> {
    let (alpha, delta) = lunar_pole(jd_tt);
    let pole = Direction::<Equatorial>::from_ra_dec(
        degrees_to_radians(alpha).value(),
        degrees_to_radians(delta).value(),
    )
    .vector();

    let near = -moon.vector();
    let north = pole - near * pole.dot(&near);
    let Some(north) = north.try_normalize(DEGENERATE_NORM) else {
        return Rotation3::identity();
    };
    let east = north.cross(&near);
    Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[east, north, near]))
}

/// Normalised earthshine intensity.
///
/// Uses the earth-phase law of Jensen et al. (2001), *A Physically-Based
/// Night Sky Model*, with the Earth's phase angle seen from the moon taken
/// as the sun–moon elongation, divided by its new-moon peak so the result
/// spans `[0, 1]`: 1 at new moon, 0 at full moon.
pub(crate) fn earthshine_intensity(sun: &Direction<Equatorial>, moon: &Direction<Equatorial>) -> f64 {
    const EDGE: f64 = 1e-6;
    let phi = sun.angle_to(moon).clamp(EDGE, PI - EDGE);
    let half = 0.5 * phi;
    let law = 0.5 * 0.19 * (1.0 - half.sin() * half.tan() * (1.0 / (0.25 * phi).tan()).ln());
    let normalised = law / EARTHSHINE_PEAK;
    if normalised.is_finite() {
        normalised.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
