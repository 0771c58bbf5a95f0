// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Reference frames and frame-tagged directions.
//!
//! A [`Direction<F>`] is a unit vector whose frame is part of its type, in the
//! same way a [`Time<S>`](crate::Time) carries its time scale:
//!
//! | Marker | Axes |
//! |--------|------|
//! | [`Equatorial`] | x → vernal equinox, y → RA 90°, z → north celestial pole (true equator of date) |
//! | [`Horizon`] | x → east, y → north, z → zenith |
//!
//! [`equatorial_to_horizon`] builds the rotation between the two from the
//! observer latitude and local sidereal time; star catalogs authored once in
//! equatorial coordinates are pushed through it every frame.

use nalgebra::{Matrix3, Rotation3, Unit, Vector3};
use qtty::Degrees;
use std::marker::PhantomData;

/// Vectors shorter than this are treated as having no direction.
pub const DEGENERATE_NORM: f64 = 1e-12;

/// Marker trait for reference frames.
pub trait Frame: Copy + Clone + std::fmt::Debug + PartialEq + 'static {
    /// Display label.
    const LABEL: &'static str;
}

/// Equatorial frame, true equator and equinox of date.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Equatorial;

impl Frame for Equatorial {
    const LABEL: &'static str = "EQU";
}

/// Local horizon frame: x east, y north, z zenith.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Horizon;

impl Frame for Horizon {
    const LABEL: &'static str = "HOR";
}

/// Unit direction expressed in frame `F`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Direction<F: Frame> {
    vector: Unit<Vector3<f64>>,
    _frame: PhantomData<F>,
}

impl<F: Frame> Direction<F> {
    /// Fallback direction for degenerate input: the frame's +z axis.
    pub fn pole() -> Self {
        Self::from_unit(Vector3::z_axis())
    }

    /// Wrap an already normalised vector.
    #[inline]
    pub fn from_unit(vector: Unit<Vector3<f64>>) -> Self {
        Self {
            vector,
            _frame: PhantomData,
        }
    }

    /// Normalise `v`, or `None` when it is (nearly) zero or not finite.
    pub fn try_new(v: Vector3<f64>) -> Option<Self> {
        Unit::try_new(v, DEGENERATE_NORM)
            .filter(|u| u.iter().all(|c| c.is_finite()))
            .map(Self::from_unit)
    }

    /// Normalise `v`, substituting [`Direction::pole`] when degenerate.
    pub fn new_or_pole(v: Vector3<f64>) -> Self {
        Self::try_new(v).unwrap_or_else(Self::pole)
    }

    /// Direction from spherical coordinates in radians (longitude measured
    /// from +x towards +y, latitude from the xy plane towards +z).
    pub fn from_spherical(longitude: f64, latitude: f64) -> Self {
        let (sl, cl) = longitude.sin_cos();
        let (sb, cb) = latitude.sin_cos();
        Self::new_or_pole(Vector3::new(cb * cl, cb * sl, sb))
    }

    /// The unit vector.
    #[inline]
    pub fn as_unit(&self) -> &Unit<Vector3<f64>> {
        &self.vector
    }

    /// The unit vector as a plain `Vector3`.
    #[inline]
    pub fn vector(&self) -> Vector3<f64> {
        self.vector.into_inner()
    }

    /// Longitude-like angle in radians, `(-π, π]`.
    #[inline]
    pub fn longitude(&self) -> f64 {
        self.vector.y.atan2(self.vector.x)
    }

    /// Latitude-like angle in radians, `[-π/2, π/2]`.
    #[inline]
    pub fn latitude(&self) -> f64 {
        self.vector.z.clamp(-1.0, 1.0).asin()
    }

    /// Angle to another direction in the same frame, radians.
    #[inline]
    pub fn angle_to(&self, other: &Self) -> f64 {
        self.vector.into_inner().angle(&other.vector.into_inner())
    }

    /// Apply a rotation, retagging the result with frame `T`.
    #[inline]
    pub fn rotate<T: Frame>(&self, rotation: &Rotation3<f64>) -> Direction<T> {
        Direction::from_unit(rotation * self.vector)
    }
}

impl<F: Frame> std::fmt::Display for Direction<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({:.6}, {:.6}, {:.6})",
            F::LABEL,
            self.vector.x,
            self.vector.y,
            self.vector.z
        )
    }
}

impl Direction<Equatorial> {
    /// Direction from right ascension and declination in radians.
    #[inline]
    pub fn from_ra_dec(ra: f64, dec: f64) -> Self {
        Self::from_spherical(ra, dec)
    }
}

impl Direction<Horizon> {
    /// Altitude above the horizon in radians.
    #[inline]
    pub fn altitude(&self) -> f64 {
        self.latitude()
    }

    /// Azimuth in radians measured from north through east, `[0, 2π)`.
    pub fn azimuth(&self) -> f64 {
        self.vector.x.atan2(self.vector.y).rem_euclid(std::f64::consts::TAU)
    }
}

/// Rotation taking equatorial directions into the local horizon frame.
///
/// Rows are the horizon axes expressed in equatorial coordinates:
///
/// ```text
/// east   = (−sin θ,        cos θ,        0    )
/// north  = (−sin φ cos θ, −sin φ sin θ,  cos φ)
/// zenith = ( cos φ cos θ,  cos φ sin θ,  sin φ)
/// ```
///
/// with φ the latitude and θ the local sidereal time.  The basis stays
/// orthonormal at the poles (east is then fixed by θ alone), so no latitude
/// needs special casing.
pub fn equatorial_to_horizon(latitude: Degrees, local_sidereal_time: Degrees) -> Rotation3<f64> {
    let (sp, cp) = latitude.value().to_radians().sin_cos();
    let (st, ct) = crate::angles::rad(local_sidereal_time.value()).sin_cos();

    let m = Matrix3::new(
        -st, ct, 0.0, //
        -sp * ct, -sp * st, cp, //
        cp * ct, cp * st, sp,
    );
    if m.iter().all(|v| v.is_finite()) {
        Rotation3::from_matrix_unchecked(m)
    } else {
        Rotation3::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn close(a: &Vector3<f64>, b: &Vector3<f64>, tol: f64) -> bool {
        (a - b).norm() < tol
    }

    #[test]
    fn degenerate_vectors_fall_back_to_pole() {
        assert!(Direction::<Equatorial>::try_new(Vector3::zeros()).is_none());
        assert!(Direction::<Equatorial>::try_new(Vector3::new(f64::NAN, 0.0, 1.0)).is_none());
        let d = Direction::<Equatorial>::new_or_pole(Vector3::new(0.0, 0.0, 1e-20));
        assert_eq!(d.vector(), Vector3::z());
    }

    #[test]
    fn spherical_roundtrip() {
        let d = Direction::<Equatorial>::from_ra_dec(1.0, -0.4);
        assert!((d.longitude() - 1.0).abs() < 1e-12);
        assert!((d.latitude() + 0.4).abs() < 1e-12);
        assert!((d.vector().norm() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn horizon_matrix_is_orthonormal() {
        for (lat, lst) in [(0.0, 0.0), (52.5, 123.4), (-33.9, 300.0), (90.0, 45.0), (-90.0, 200.0)] {
            let r = equatorial_to_horizon(Degrees::new(lat), Degrees::new(lst));
            let m = r.matrix();
            assert!((m * m.transpose() - Matrix3::identity()).norm() < 1e-12);
            assert!((m.determinant() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn zenith_declination_equals_latitude() {
        // At LST 0 the zenith sits at RA 0, Dec = latitude.
        let lat = 48.2;
        let r = equatorial_to_horizon(Degrees::new(lat), Degrees::new(0.0));
        let zenith = Direction::<Horizon>::pole();
        let eq: Direction<Equatorial> = zenith.rotate(&r.inverse());
        assert!((eq.latitude().to_degrees() - lat).abs() < 1e-10);
        assert!(eq.longitude().abs() < 1e-10);
    }

    #[test]
    fn celestial_pole_altitude_equals_latitude() {
        let lat = 37.0;
        let r = equatorial_to_horizon(Degrees::new(lat), Degrees::new(211.0));
        let pole: Direction<Horizon> = Direction::<Equatorial>::pole().rotate(&r);
        assert!((pole.altitude().to_degrees() - lat).abs() < 1e-10);
        assert!(pole.azimuth() < 1e-10 || (pole.azimuth() - 2.0 * PI).abs() < 1e-10);
    }

    #[test]
    fn meridian_transit_is_due_south_for_northern_observer() {
        // A star at RA = LST crosses the meridian; south of zenith when dec < lat.
        let r = equatorial_to_horizon(Degrees::new(50.0), Degrees::new(90.0));
        let star = Direction::<Equatorial>::from_ra_dec(FRAC_PI_2, 0.0);
        let h: Direction<Horizon> = star.rotate(&r);
        assert!((h.azimuth() - PI).abs() < 1e-10);
        assert!((h.altitude().to_degrees() - 40.0).abs() < 1e-10);
        assert!(close(&h.vector(), &Vector3::new(0.0, -(40f64.to_radians().cos()), 40f64.to_radians().sin()), 1e-12));
    }

    #[test]
    fn display_mentions_frame() {
        let s = format!("{}", Direction::<Horizon>::pole());
        assert!(s.starts_with("HOR"));
    }
}
