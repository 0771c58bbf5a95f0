// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Engine configuration.
//!
//! [`SkyConfig`] captures the operator-configured part of a sky scene: where
//! the observer stands and which ephemeris tier to run.  With the `serde`
//! feature it round-trips through any serde format.

use std::fmt;
use std::str::FromStr;

use crate::engine::Astronomy;
use crate::ephemeris::AnyEphemeris;
use crate::error::SkyError;

/// Selectable ephemeris tier.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum EphemerisKind {
    #[default]
    Standard,
    Low,
}

impl EphemerisKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for EphemerisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EphemerisKind {
    type Err = SkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" | "meeus" => Ok(Self::Standard),
            "low" | "low-accuracy" => Ok(Self::Low),
            _ => Err(SkyError::UnknownEphemeris(s.to_string())),
        }
    }
}

/// Observer location and ephemeris selection.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SkyConfig {
    /// Geodetic latitude in degrees (clamped to `[-90, 90]` on build).
    pub latitude_deg: f64,
    /// East-positive longitude in degrees (wrapped to `[-180, 180)` on build).
    pub longitude_deg: f64,
    pub ephemeris: EphemerisKind,
}

impl SkyConfig {
    pub const fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            ephemeris: EphemerisKind::Standard,
        }
    }

    pub const fn with_ephemeris(mut self, ephemeris: EphemerisKind) -> Self {
        self.ephemeris = ephemeris;
        self
    }

    /// Engine for this configuration, at J2000.0 until the first update.
    pub fn build(&self) -> Astronomy<AnyEphemeris> {
        let mut engine = Astronomy::new(AnyEphemeris::from(self.ephemeris));
        engine.set_location(self.latitude_deg, self.longitude_deg);
        engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::EphemerisAlgorithm;

    #[test]
    fn parses_tier_names() {
        assert_eq!("standard".parse::<EphemerisKind>(), Ok(EphemerisKind::Standard));
        assert_eq!(" LOW ".parse::<EphemerisKind>(), Ok(EphemerisKind::Low));
        assert_eq!(
            "vsop87".parse::<EphemerisKind>(),
            Err(SkyError::UnknownEphemeris("vsop87".into()))
        );
        assert_eq!(EphemerisKind::Low.to_string(), "low");
    }

    #[test]
    fn build_applies_location_and_tier() {
        let engine = SkyConfig::new(95.0, 200.0)
            .with_ephemeris(EphemerisKind::Low)
            .build();
        assert_eq!(engine.latitude().value(), 90.0);
        assert_eq!(engine.longitude().value(), -160.0);
        assert_eq!(engine.ephemeris().kind(), EphemerisKind::Low);
        assert_eq!(engine.ephemeris().name(), "low");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_roundtrip() {
        let cfg = SkyConfig::new(48.1, 11.6).with_ephemeris(EphemerisKind::Low);
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"low\""));
        let back: SkyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);

        let partial: SkyConfig = serde_json::from_str(r#"{"latitude_deg": 10.0}"#).unwrap();
        assert_eq!(partial.ephemeris, EphemerisKind::Standard);
        assert_eq!(partial.longitude_deg, 0.0);
    }
}
