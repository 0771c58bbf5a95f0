// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type for the fallible edges of the crate.
//!
//! Position queries never fail: degenerate inputs are normalised or replaced
//! by documented fallbacks.  Errors only arise where user-supplied values
//! cross into another representation (configuration strings, civil dates).

use thiserror::Error;

/// Errors returned by configuration, calendar and clock helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SkyError {
    /// Configuration named an ephemeris tier that does not exist.
    #[error("unknown ephemeris `{0}` (expected `standard` or `low`)")]
    UnknownEphemeris(String),

    /// A civil date that the proleptic Gregorian calendar cannot represent.
    #[error("invalid calendar date {year:04}-{month:02}-{day:02}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
    },

    /// An instant outside the range `chrono` can represent.
    #[error("Julian Day {0} is outside the representable calendar range")]
    DateOutOfRange(f64),

    /// A day-cycle length that is not a positive, finite number of seconds.
    #[error("invalid day-cycle length: {0} s")]
    InvalidCycleLength(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_readable() {
        assert_eq!(
            SkyError::InvalidDate { year: 2023, month: 2, day: 30 }.to_string(),
            "invalid calendar date 2023-02-30"
        );
        assert!(SkyError::UnknownEphemeris("vsop".into()).to_string().contains("vsop"));
    }
}
