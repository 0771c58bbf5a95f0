// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Runtime-selected ephemeris.

use nalgebra::Rotation3;
use qtty::Radians;

use super::{
    Body, BodyPosition, EphemerisAlgorithm, LowAccuracyEphemeris, StandardEphemeris,
    ValidityWindow,
};
use crate::config::EphemerisKind;
use crate::frames::{Direction, Equatorial};
use crate::instant::Time;
use crate::observer::Location;
use crate::scales::UT;

/// Either ephemeris tier, chosen at runtime (e.g. from configuration).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AnyEphemeris {
    Standard(StandardEphemeris),
    Low(LowAccuracyEphemeris),
}

impl AnyEphemeris {
    /// Which tier this is.
    pub fn kind(&self) -> EphemerisKind {
        match self {
            Self::Standard(_) => EphemerisKind::Standard,
            Self::Low(_) => EphemerisKind::Low,
        }
    }

    fn inner(&self) -> &dyn EphemerisAlgorithm {
        match self {
            Self::Standard(e) => e,
            Self::Low(e) => e,
        }
    }
}

impl Default for AnyEphemeris {
    fn default() -> Self {
        Self::Standard(StandardEphemeris)
    }
}

impl From<EphemerisKind> for AnyEphemeris {
    fn from(kind: EphemerisKind) -> Self {
        match kind {
            EphemerisKind::Standard => Self::Standard(StandardEphemeris),
            EphemerisKind::Low => Self::Low(LowAccuracyEphemeris),
        }
    }
}

impl From<StandardEphemeris> for AnyEphemeris {
    fn from(e: StandardEphemeris) -> Self {
        Self::Standard(e)
    }
}

impl From<LowAccuracyEphemeris> for AnyEphemeris {
    fn from(e: LowAccuracyEphemeris) -> Self {
        Self::Low(e)
    }
}

impl EphemerisAlgorithm for AnyEphemeris {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn validity(&self) -> ValidityWindow {
        self.inner().validity()
    }

    fn sun(&self, t: Time<UT>, location: &Location) -> BodyPosition {
        self.inner().sun(t, location)
    }

    fn moon(&self, t: Time<UT>, location: &Location) -> BodyPosition {
        self.inner().moon(t, location)
    }

    fn angular_radius(&self, body: Body, t: Time<UT>, location: &Location) -> Radians {
        self.inner().angular_radius(body, t, location)
    }

    fn moon_orientation(&self, t: Time<UT>, moon: &Direction<Equatorial>) -> Rotation3<f64> {
        self.inner().moon_orientation(t, moon)
    }

    fn earthshine_intensity(&self, sun: &Direction<Equatorial>, moon: &Direction<Equatorial>) -> f64 {
        self.inner().earthshine_intensity(sun, moon)
    }
}
