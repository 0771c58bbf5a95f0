// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Astronomy engine.
//!
//! [`Astronomy`] holds the snapshot (time, observer location and per-body
//! overrides) and derives everything a sky renderer needs from it.  Derived
//! values are cached; the cache is either [`CacheState::Clean`] (outputs
//! match the snapshot) or [`CacheState::Dirty`].  Every snapshot mutation
//! moves it to `Dirty`; the first query afterwards recomputes all outputs at
//! once and moves it back to `Clean`, so every output of one tick comes from
//! the same snapshot.
//!
//! ```
//! use skydome::{Astronomy, Body, CalendarMoment};
//!
//! let mut sky: Astronomy = Astronomy::default();
//! sky.set_location(52.52, 13.40);
//! sky.update(CalendarMoment::utc(2024, 6, 21, 20, 0, 0.0).into());
//!
//! let sun = sky.sun_horizon_direction();
//! assert!(sun.altitude() < 0.1);
//! assert!(sky.angular_radius(Body::Moon).value() > 0.0);
//! ```

use std::cell::Cell;

use log::{debug, trace, warn};
use nalgebra::{Rotation3, Vector3};
use qtty::{Degrees, Radians};

use crate::ephemeris::{Body, EphemerisAlgorithm, StandardEphemeris};
use crate::frames::{equatorial_to_horizon, Direction, Equatorial, Horizon};
use crate::instant::Time;
use crate::observer::Location;
use crate::scales::UT;
use crate::sidereal::local_sidereal_time;

/// Observable cache state.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CacheState {
    /// Cached outputs match the current snapshot.
    Clean,
    /// The snapshot changed since the last recompute.
    Dirty,
}

/// Everything derived from one snapshot.
#[derive(Debug, Copy, Clone)]
struct Derived {
    sun: Direction<Equatorial>,
    moon: Direction<Equatorial>,
    sun_radius: Radians,
    moon_radius: Radians,
    moon_orientation: Rotation3<f64>,
    earthshine: f64,
    local_sidereal_time: Degrees,
    horizon: Rotation3<f64>,
}

#[derive(Debug, Copy, Clone)]
enum Cache {
    Dirty,
    Clean(Derived),
}

/// Sun/moon position engine for one observer.
///
/// Queries take `&self`; the cache lives in a [`Cell`], so the engine is
/// `Send` but not `Sync`.  Share it across threads behind a lock.
#[derive(Debug, Clone)]
pub struct Astronomy<E: EphemerisAlgorithm = StandardEphemeris> {
    ephemeris: E,
    time: Time<UT>,
    location: Location,
    sun_override: Option<Direction<Equatorial>>,
    moon_override: Option<Direction<Equatorial>>,
    cache: Cell<Cache>,
    recomputes: Cell<u64>,
}

impl<E: EphemerisAlgorithm + Default> Default for Astronomy<E> {
    fn default() -> Self {
        Self::new(E::default())
    }
}

impl<E: EphemerisAlgorithm> Astronomy<E> {
    /// Engine at J2000.0 for an observer at (0°, 0°).
    pub fn new(ephemeris: E) -> Self {
        Self {
            ephemeris,
            time: Time::<UT>::J2000,
            location: Location::default(),
            sun_override: None,
            moon_override: None,
            cache: Cell::new(Cache::Dirty),
            recomputes: Cell::new(0),
        }
    }

    /// The ephemeris in use.
    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    // ── Snapshot ──────────────────────────────────────────────────────────

    /// Set the observer location; returns what was stored after latitude
    /// clamping and longitude wrapping.
    pub fn set_location(&mut self, latitude: f64, longitude: f64) -> Location {
        let location = Location::from_degrees(latitude, longitude);
        if location.latitude().value() != latitude || location.longitude().value() != longitude {
            debug!("observer ({latitude}, {longitude}) normalised to {location}");
        }
        self.location = location;
        self.invalidate();
        location
    }

    /// Set the latitude only; returns the clamped value stored.
    pub fn set_latitude(&mut self, latitude: f64) -> Degrees {
        self.set_location(latitude, self.location.longitude().value())
            .latitude()
    }

    /// Set the longitude only; returns the wrapped value stored.
    pub fn set_longitude(&mut self, longitude: f64) -> Degrees {
        self.set_location(self.location.latitude().value(), longitude)
            .longitude()
    }

    #[inline]
    pub fn location(&self) -> Location {
        self.location
    }

    #[inline]
    pub fn latitude(&self) -> Degrees {
        self.location.latitude()
    }

    #[inline]
    pub fn longitude(&self) -> Degrees {
        self.location.longitude()
    }

    /// Push a new moment.  Returns `true` when it differs from the current
    /// one (the cache is then dirty); an unchanged time is a no-op.
    ///
    /// Times are compared bit for bit, so repeating a NaN is a no-op too.
    pub fn update(&mut self, time: Time<UT>) -> bool {
        if time.value().to_bits() == self.time.value().to_bits() {
            return false;
        }
        if !self.ephemeris.validity().contains(time) {
            debug!(
                "{time} outside the {} ephemeris validity window, accuracy degrades",
                self.ephemeris.name()
            );
        }
        self.time = time;
        self.invalidate();
        true
    }

    #[inline]
    pub fn time(&self) -> Time<UT> {
        self.time
    }

    /// Enable or clear the sun override.  While enabled, `direction`
    /// (normalised) replaces the computed sun direction.  Returns whether the
    /// override is now active.
    pub fn set_override_sun_position(&mut self, enabled: bool, direction: Vector3<f64>) -> bool {
        self.sun_override = enabled.then(|| override_direction(Body::Sun, direction));
        self.invalidate();
        enabled
    }

    /// Active sun override, if any.
    pub fn override_sun_position(&self) -> Option<Direction<Equatorial>> {
        self.sun_override
    }

    /// Enable or clear the moon override; see
    /// [`set_override_sun_position`](Self::set_override_sun_position).
    pub fn set_override_moon_position(&mut self, enabled: bool, direction: Vector3<f64>) -> bool {
        self.moon_override = enabled.then(|| override_direction(Body::Moon, direction));
        self.invalidate();
        enabled
    }

    /// Active moon override, if any.
    pub fn override_moon_position(&self) -> Option<Direction<Equatorial>> {
        self.moon_override
    }

    // ── Cache ─────────────────────────────────────────────────────────────

    pub fn state(&self) -> CacheState {
        match self.cache.get() {
            Cache::Dirty => CacheState::Dirty,
            Cache::Clean(_) => CacheState::Clean,
        }
    }

    /// Number of times derived outputs have been recomputed.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes.get()
    }

    fn invalidate(&mut self) {
        self.cache.set(Cache::Dirty);
    }

    fn derived(&self) -> Derived {
        if let Cache::Clean(derived) = self.cache.get() {
            return derived;
        }
        let derived = self.recompute();
        self.cache.set(Cache::Clean(derived));
        self.recomputes.set(self.recomputes.get() + 1);
        derived
    }

    fn recompute(&self) -> Derived {
        let (t, loc) = (self.time, &self.location);
        trace!("recomputing {} ephemeris at {t} for {loc}", self.ephemeris.name());

        // One evaluation per body; overrides only replace the direction.
        let sun_position = self.ephemeris.sun(t, loc);
        let moon_position = self.ephemeris.moon(t, loc);
        let sun = self.sun_override.unwrap_or(sun_position.direction);
        let moon = self.moon_override.unwrap_or(moon_position.direction);
        let lst = local_sidereal_time(t, loc.longitude());

        Derived {
            sun,
            moon,
            sun_radius: self.ephemeris.angular_radius_of(Body::Sun, &sun_position),
            moon_radius: self.ephemeris.angular_radius_of(Body::Moon, &moon_position),
            moon_orientation: self.ephemeris.moon_orientation(t, &moon),
            earthshine: self.ephemeris.earthshine_intensity(&sun, &moon),
            local_sidereal_time: lst,
            horizon: equatorial_to_horizon(loc.latitude(), lst),
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Sun direction in the equatorial frame (override applied).
    pub fn sun_direction(&self) -> Direction<Equatorial> {
        self.derived().sun
    }

    /// Moon direction in the equatorial frame (override applied).
    pub fn moon_direction(&self) -> Direction<Equatorial> {
        self.derived().moon
    }

    /// Lunar disc orientation consistent with [`moon_direction`](Self::moon_direction).
    ///
    /// Columns are the disc's east, north and near-side axes in equatorial
    /// coordinates.
    pub fn moon_orientation(&self) -> Rotation3<f64> {
        self.derived().moon_orientation
    }

    /// Apparent angular radius (half-angle) of `body`, in radians.
    pub fn angular_radius(&self, body: Body) -> Radians {
        let derived = self.derived();
        match body {
            Body::Sun => derived.sun_radius,
            Body::Moon => derived.moon_radius,
        }
    }

    /// Earthshine on the moon's unlit limb, `[0, 1]`.
    pub fn earthshine_intensity(&self) -> f64 {
        self.derived().earthshine
    }

    /// Local apparent sidereal time of the snapshot.
    pub fn local_sidereal_time(&self) -> Degrees {
        self.derived().local_sidereal_time
    }

    /// Rotation from the equatorial frame into the local horizon frame
    /// (x east, y north, z zenith).
    pub fn equatorial_to_horizon_matrix(&self) -> Rotation3<f64> {
        self.derived().horizon
    }

    /// Express an equatorial direction in the local horizon frame.
    pub fn to_horizon(&self, direction: &Direction<Equatorial>) -> Direction<Horizon> {
        direction.rotate(&self.derived().horizon)
    }

    pub fn sun_horizon_direction(&self) -> Direction<Horizon> {
        let derived = self.derived();
        derived.sun.rotate(&derived.horizon)
    }

    pub fn moon_horizon_direction(&self) -> Direction<Horizon> {
        let derived = self.derived();
        derived.moon.rotate(&derived.horizon)
    }

    // ── Snapshot-free queries ─────────────────────────────────────────────
    //
    // Evaluate the ephemeris for an arbitrary moment and place without
    // touching the cache.  Overrides do not apply.

    pub fn sun_direction_at(&self, time: Time<UT>, location: &Location) -> Direction<Equatorial> {
        self.ephemeris.sun_direction(time, location)
    }

    pub fn moon_direction_at(&self, time: Time<UT>, location: &Location) -> Direction<Equatorial> {
        self.ephemeris.moon_direction(time, location)
    }

    pub fn angular_radius_at(&self, body: Body, time: Time<UT>, location: &Location) -> Radians {
        self.ephemeris.angular_radius(body, time, location)
    }

    pub fn moon_orientation_at(&self, time: Time<UT>, location: &Location) -> Rotation3<f64> {
        let moon = self.ephemeris.moon_direction(time, location);
        self.ephemeris.moon_orientation(time, &moon)
    }

    pub fn earthshine_intensity_at(&self, time: Time<UT>, location: &Location) -> f64 {
        let sun = self.ephemeris.sun_direction(time, location);
        let moon = self.ephemeris.moon_direction(time, location);
        self.ephemeris.earthshine_intensity(&sun, &moon)
    }
}

fn override_direction(body: Body, v: Vector3<f64>) -> Direction<Equatorial> {
    Direction::try_new(v).unwrap_or_else(|| {
        warn!("degenerate {body:?} override {v:?}, using the celestial pole");
        Direction::pole()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarMoment;
    use crate::ephemeris::LowAccuracyEphemeris;

    fn engine_at(y: i32, m: u32, d: u32) -> Astronomy {
        let mut sky = Astronomy::default();
        sky.update(CalendarMoment::date(y, m, d).to_astronomical_time());
        sky
    }

    #[test]
    fn starts_dirty_and_cleans_on_query() {
        let sky = Astronomy::<StandardEphemeris>::default();
        assert_eq!(sky.state(), CacheState::Dirty);
        let _ = sky.sun_direction();
        assert_eq!(sky.state(), CacheState::Clean);
        assert_eq!(sky.recompute_count(), 1);
    }

    #[test]
    fn repeated_queries_do_not_recompute() {
        let sky = engine_at(2024, 3, 1);
        let a = sky.moon_direction();
        let _ = sky.equatorial_to_horizon_matrix();
        let _ = sky.angular_radius(Body::Sun);
        let b = sky.moon_direction();
        assert_eq!(a, b);
        assert_eq!(sky.recompute_count(), 1);
    }

    #[test]
    fn update_with_same_time_is_a_no_op() {
        let mut sky = engine_at(2024, 3, 1);
        let _ = sky.sun_direction();
        let t = sky.time();
        assert!(!sky.update(t));
        assert_eq!(sky.state(), CacheState::Clean);
        assert!(sky.update(t + qtty::Days::new(0.25)));
        assert_eq!(sky.state(), CacheState::Dirty);
    }

    #[test]
    fn location_change_forces_recompute_at_same_time() {
        let mut sky = engine_at(2024, 3, 1);
        let before = sky.equatorial_to_horizon_matrix();
        sky.set_location(45.0, 7.0);
        assert_eq!(sky.state(), CacheState::Dirty);
        let t = sky.time();
        assert!(!sky.update(t));
        assert_ne!(before, sky.equatorial_to_horizon_matrix());
        assert_eq!(sky.recompute_count(), 2);
    }

    #[test]
    fn location_setters_report_stored_values() {
        let mut sky = Astronomy::<LowAccuracyEphemeris>::default();
        let stored = sky.set_location(100.0, 190.0);
        assert_eq!(stored.latitude().value(), 90.0);
        assert_eq!(stored.longitude().value(), -170.0);
        assert_eq!(sky.set_latitude(-100.0).value(), -90.0);
        assert_eq!(sky.longitude().value(), -170.0);
        assert_eq!(sky.set_longitude(360.0).value(), 0.0);
        assert_eq!(sky.latitude().value(), -90.0);
    }

    #[test]
    fn overrides_replace_and_restore() {
        let mut sky = engine_at(2010, 7, 4);
        let computed = sky.sun_direction();
        let v = Vector3::new(0.0, 3.0, 4.0);

        assert!(sky.set_override_sun_position(true, v));
        assert_eq!(sky.sun_direction().vector(), v.normalize());
        assert_eq!(sky.override_sun_position().map(|d| d.vector()), Some(v.normalize()));

        sky.update(sky.time() + qtty::Days::new(100.0));
        sky.set_location(-33.9, 18.4);
        assert_eq!(sky.sun_direction().vector(), v.normalize());

        assert!(!sky.set_override_sun_position(false, Vector3::zeros()));
        assert!(sky.override_sun_position().is_none());
        assert_ne!(sky.sun_direction(), computed);
        assert_ne!(sky.sun_direction().vector(), v.normalize());
    }

    #[test]
    fn degenerate_override_uses_pole() {
        let mut sky = engine_at(2010, 7, 4);
        sky.set_override_moon_position(true, Vector3::zeros());
        assert_eq!(sky.moon_direction().vector(), Vector3::z());
        assert!(sky.moon_orientation().matrix().iter().all(|v| v.is_finite()));
        assert!(sky.earthshine_intensity().is_finite());
    }

    #[test]
    fn moon_override_drives_orientation_and_earthshine() {
        let mut sky = engine_at(2010, 7, 4);
        let sun = sky.sun_direction().vector();
        // Moon opposite the sun: full moon, no earthshine.
        sky.set_override_moon_position(true, -sun);
        assert!(sky.earthshine_intensity() < 1e-3);
        let near = sky.moon_orientation() * Vector3::z();
        assert!((near - sun).norm() < 1e-9);
        // Moon next to the sun: new moon.
        sky.set_override_moon_position(true, sun);
        assert!(sky.earthshine_intensity() > 0.99);
    }

    #[test]
    fn snapshot_free_queries_ignore_overrides() {
        let mut sky = engine_at(2015, 1, 1);
        let t = sky.time();
        let loc = sky.location();
        let computed = sky.sun_direction();
        sky.set_override_sun_position(true, Vector3::x());
        assert_eq!(sky.sun_direction_at(t, &loc), computed);
        assert!(sky.angular_radius_at(Body::Sun, t, &loc).value() > 0.0);
        assert!(sky.earthshine_intensity_at(t, &loc).is_finite());
        let moon = sky.moon_direction_at(t, &loc);
        assert_eq!(sky.moon_orientation_at(t, &loc), sky.ephemeris().moon_orientation(t, &moon));
    }

    #[test]
    fn horizon_helpers_agree_with_matrix() {
        let mut sky = engine_at(2022, 12, 21);
        sky.set_location(60.0, 25.0);
        let m = sky.equatorial_to_horizon_matrix();
        let expected = m * sky.sun_direction().vector();
        assert!((sky.sun_horizon_direction().vector() - expected).norm() < 1e-12);
        let moon = sky.moon_direction();
        assert_eq!(sky.to_horizon(&moon), sky.moon_horizon_direction());
    }

    #[test]
    fn midsummer_noon_sun_is_high() {
        // Greenwich, 2021-06-21 12:00 UTC: altitude ≈ 90 − 51.48 + 23.44.
        let mut sky = Astronomy::<StandardEphemeris>::default();
        sky.set_location(51.48, 0.0);
        sky.update(CalendarMoment::utc(2021, 6, 21, 12, 0, 0.0).into());
        let alt = sky.sun_horizon_direction().altitude().to_degrees();
        assert!((alt - 61.96).abs() < 0.3, "altitude {alt}");
    }

    #[test]
    fn repeated_nan_update_is_a_no_op() {
        let mut sky = engine_at(2024, 3, 1);
        assert!(sky.update(Time::<UT>::new(f64::NAN)));
        let _ = sky.sun_direction();
        assert!(!sky.update(Time::<UT>::new(f64::NAN)));
        assert_eq!(sky.state(), CacheState::Clean);
        assert_eq!(sky.recompute_count(), 1);
    }

    #[test]
    fn clearing_moon_override_restores_computed_values() {
        let mut sky = engine_at(2012, 11, 13);
        sky.set_location(-16.9, 145.8);
        let (t, loc) = (sky.time(), sky.location());
        let orientation = sky.moon_orientation();
        let earthshine = sky.earthshine_intensity();

        sky.set_override_moon_position(true, Vector3::new(-1.0, 0.5, 0.2));
        assert_ne!(sky.moon_direction(), sky.moon_direction_at(t, &loc));
        assert_ne!(sky.moon_orientation(), orientation);

        assert!(!sky.set_override_moon_position(false, Vector3::zeros()));
        assert!(sky.override_moon_position().is_none());
        assert_eq!(sky.moon_direction(), sky.moon_direction_at(t, &loc));
        assert_eq!(sky.moon_orientation(), orientation);
        assert_eq!(sky.moon_orientation(), sky.moon_orientation_at(t, &loc));
        assert_eq!(sky.earthshine_intensity().to_bits(), earthshine.to_bits());
        assert_eq!(
            sky.earthshine_intensity().to_bits(),
            sky.earthshine_intensity_at(t, &loc).to_bits()
        );
    }

    /// Counts series evaluations behind the ephemeris seam.
    #[derive(Debug, Default)]
    struct Counting {
        inner: StandardEphemeris,
        sun_calls: Cell<u32>,
        moon_calls: Cell<u32>,
    }

    impl EphemerisAlgorithm for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn validity(&self) -> crate::ephemeris::ValidityWindow {
            self.inner.validity()
        }

        fn sun(&self, t: Time<UT>, location: &Location) -> crate::ephemeris::BodyPosition {
            self.sun_calls.set(self.sun_calls.get() + 1);
            self.inner.sun(t, location)
        }

        fn moon(&self, t: Time<UT>, location: &Location) -> crate::ephemeris::BodyPosition {
            self.moon_calls.set(self.moon_calls.get() + 1);
            self.inner.moon(t, location)
        }
    }

    #[test]
    fn recompute_evaluates_each_body_once() {
        let mut sky = Astronomy::new(Counting::default());
        sky.update(CalendarMoment::date(2030, 6, 1).to_astronomical_time());
        let _ = sky.sun_direction();
        let _ = sky.angular_radius(Body::Sun);
        let _ = sky.angular_radius(Body::Moon);
        let _ = sky.earthshine_intensity();
        assert_eq!(sky.recompute_count(), 1);
        assert_eq!(sky.ephemeris().sun_calls.get(), 1);
        assert_eq!(sky.ephemeris().moon_calls.get(), 1);

        // Radii come from the same evaluation as the directions.
        let (t, loc) = (sky.time(), sky.location());
        let expected = sky.ephemeris().inner.angular_radius(Body::Moon, t, &loc);
        assert_eq!(sky.angular_radius(Body::Moon).value().to_bits(), expected.value().to_bits());

        sky.set_override_sun_position(true, Vector3::x());
        let _ = sky.sun_direction();
        assert_eq!(sky.ephemeris().sun_calls.get(), 2);
        assert_eq!(sky.ephemeris().moon_calls.get(), 2);
    }

    #[test]
    fn engine_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Astronomy<StandardEphemeris>>();
    }
}
