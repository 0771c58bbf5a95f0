// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer location on the Earth's surface.

use nalgebra::Vector3;
use qtty::Degrees;

use crate::angles::{clamp_latitude, wrap_longitude};

/// Geodetic latitude / east-positive longitude of the observer.
///
/// Always canonical: latitude in `[-90, 90]`, longitude in `[-180, 180)`.
/// Construction never fails; out-of-range input is clamped or wrapped and
/// the corrected value is what the accessors report.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Location {
    latitude: Degrees,
    longitude: Degrees,
}

impl Location {
    /// Normalising constructor.
    pub fn new(latitude: Degrees, longitude: Degrees) -> Self {
        Self {
            latitude: clamp_latitude(latitude),
            longitude: wrap_longitude(longitude),
        }
    }

    /// Convenience constructor from raw degrees.
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Self::new(Degrees::new(latitude), Degrees::new(longitude))
    }

    #[inline]
    pub const fn latitude(&self) -> Degrees {
        self.latitude
    }

    #[inline]
    pub const fn longitude(&self) -> Degrees {
        self.longitude
    }

    /// Geocentric position of a sea-level observer in the equatorial frame,
    /// in kilometres, for a given local sidereal time (Meeus ch. 11).
    pub(crate) fn geocentric_km(&self, local_sidereal_time: Degrees) -> Vector3<f64> {
        const EARTH_EQUATORIAL_RADIUS_KM: f64 = 6_378.14;
        const POLAR_AXIS_RATIO: f64 = 0.996_647_19;

        let phi = self.latitude.value().to_radians();
        let u = (POLAR_AXIS_RATIO * phi.tan()).atan();
        let rho_cos = u.cos();
        let rho_sin = POLAR_AXIS_RATIO * u.sin();
        let (st, ct) = crate::angles::rad(local_sidereal_time.value()).sin_cos();
        Vector3::new(rho_cos * ct, rho_cos * st, rho_sin) * EARTH_EQUATORIAL_RADIUS_KM
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::from_degrees(0.0, 0.0)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "lat {:.4}°, lon {:.4}°", self.latitude.value(), self.longitude.value())
    }
}
