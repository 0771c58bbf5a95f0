// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Sky Dome Astronomy
//!
//! Astronomical position engine for procedural sky domes: given a moment and
//! an observer, compute where the sun and moon are, how large they appear,
//! how the lunar disc is oriented, how much earthshine lights its dark limb,
//! and how the equatorial star sphere sits over the local horizon.
//!
//! # Core types
//!
//! - [`Time<S>`]: instant parameterised by a [`TimeScale`] marker;
//!   [`AstronomicalTime`] (`Time<UT>`) drives the engine.
//! - [`CalendarMoment`]: civil date and time plus UTC offset.
//! - [`Location`]: observer latitude/longitude, always canonical.
//! - [`Direction<F>`]: unit vector tagged by a [`Frame`] ([`Equatorial`] or
//!   [`Horizon`]).
//! - [`Astronomy<E>`]: cached engine over an [`EphemerisAlgorithm`].
//! - [`DayCycle`]: accelerated time-of-day clock feeding the engine.
//! - [`SkyConfig`]: observer and ephemeris selection, serde-ready.
//!
//! # Conventions
//!
//! | Quantity | Convention |
//! |----------|------------|
//! | time | Julian Day on the UT axis; ephemerides convert to TT via ΔT |
//! | latitude | degrees, clamped to `[-90, 90]` |
//! | longitude | degrees east, wrapped to `[-180, 180)` |
//! | equatorial frame | true equator and equinox of date, x → vernal equinox, z → north pole |
//! | horizon frame | x east, y north, z zenith |
//! | angular radius | radians (half-angle) |
//! | earthshine | `[0, 1]`, 1 at new moon |
//!
//! # Example
//!
//! ```
//! use skydome::{Astronomy, CalendarMoment, StandardEphemeris};
//!
//! let mut sky = Astronomy::new(StandardEphemeris);
//! sky.set_location(-33.86, 151.21);
//! sky.update(CalendarMoment::utc(2024, 12, 25, 1, 0, 0.0).with_utc_offset(0.0).into());
//!
//! let stars = sky.equatorial_to_horizon_matrix();
//! let moon = sky.moon_horizon_direction();
//! assert!((stars.matrix().determinant() - 1.0).abs() < 1e-12);
//! assert!(moon.altitude().abs() <= std::f64::consts::FRAC_PI_2);
//! ```

mod angles;
mod calendar;
mod clock;
mod config;
mod delta_t;
mod engine;
mod ephemeris;
mod error;
mod frames;
pub(crate) mod instant;
mod observer;
pub(crate) mod scales;
mod sidereal;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use angles::{clamp_latitude, wrap_180, wrap_360, wrap_longitude};
pub use calendar::CalendarMoment;
pub use clock::DayCycle;
pub use config::{EphemerisKind, SkyConfig};
pub use engine::{Astronomy, CacheState};
pub use ephemeris::{
    AnyEphemeris, Body, BodyPosition, EphemerisAlgorithm, LowAccuracyEphemeris,
    StandardEphemeris, ValidityWindow, ASTRONOMICAL_UNIT_KM, MOON_RADIUS_KM, SUN_RADIUS_KM,
};
pub use error::SkyError;
pub use frames::{equatorial_to_horizon, Direction, Equatorial, Frame, Horizon, DEGENERATE_NORM};
pub use instant::{Time, TimeScale};
pub use observer::Location;
pub use scales::{JD, UT};
pub use sidereal::{
    greenwich_apparent_sidereal_time, greenwich_mean_sidereal_time, local_sidereal_time,
    SIDEREAL_DAY, SIDEREAL_RATE_DEG_PER_DAY,
};

/// Astronomical time: Julian Day on the Earth-rotation (UT) axis.
///
/// This is a type alias for [`Time<UT>`].
pub type AstronomicalTime = Time<UT>;

/// Julian Day on the uniform TT axis.
///
/// This is a type alias for [`Time<JD>`].
pub type JulianDate = Time<JD>;
