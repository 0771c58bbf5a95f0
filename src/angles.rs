// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Angle normalisation.
//!
//! Every angle is brought into a canonical range before it reaches a
//! trigonometric function, so results never depend on which branch of a
//! wrap-around an input happened to come from.

use qtty::{Degrees, Radian, Radians};

/// Wrap degrees into `[0, 360)`.
#[inline]
pub fn wrap_360(deg: f64) -> f64 {
    let r = deg.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360 for tiny negative inputs.
    if r >= 360.0 {
        0.0
    } else {
        r
    }
}

/// Wrap degrees into `[-180, 180)`.
#[inline]
pub fn wrap_180(deg: f64) -> f64 {
    wrap_360(deg + 180.0) - 180.0
}

/// Clamp a latitude into `[-90, 90]`.
#[inline]
pub fn clamp_latitude(latitude: Degrees) -> Degrees {
    Degrees::new(latitude.value().clamp(-90.0, 90.0))
}

/// Wrap a longitude into `[-180, 180)`, east positive.
#[inline]
pub fn wrap_longitude(longitude: Degrees) -> Degrees {
    Degrees::new(wrap_180(longitude.value()))
}

/// Degrees (normalised into `[0, 360)`) as a raw radian scalar.
#[inline]
pub(crate) fn rad(deg: f64) -> f64 {
    wrap_360(deg).to_radians()
}

/// Typed degree-to-radian conversion.
#[inline]
pub(crate) fn degrees_to_radians(d: Degrees) -> Radians {
    d.to::<Radian>()
}
