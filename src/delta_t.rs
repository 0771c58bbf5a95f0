// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): UT↔TT correction
//!
//! Piecewise polynomial model for **ΔT = TT − UT** by Espenak & Meeus
//! (NASA *Five Millennium Canon of Solar Eclipses*, 2006), with the
//! Morrison & Stephenson (2004) long-term parabola outside −500…+2150.
//!
//! The correction is applied automatically by the [`UT`](super::UT) scale:
//! the engine is driven with `Time<UT>` and ephemerides call
//! `.to::<JD>()` to land on the TT axis they are formulated in.
//!
//! ```rust
//! use skydome::{Time, JD, UT};
//!
//! let ut = Time::<UT>::new(2_451_545.0);
//! let tt = ut.to::<JD>();
//! println!("ΔT = {}", ut.delta_t());
//! assert!(tt.value() > ut.value());
//! ```
//!
//! ## Accuracy
//! Better than 1 s between 1900 and 2025, a few seconds until 2050 and
//! growing quadratically beyond.  For a sky renderer even a minute of error
//! only shifts the moon by about half a lunar radius.

use super::instant::Time;
use super::scales::UT;
use qtty::{Days, Seconds, Simplify};

/// JD(UT) of 2000-01-01T00:00, origin of the decimal year count.
const JD_YEAR_2000_UT: Time<UT> = Time::new(2_451_544.5);

/// Mean Gregorian year length in days.
const GREGORIAN_YEAR: Days = Days::new(365.2425);

/// One polynomial segment: `ΔT = Σ cₖ·uᵏ`, `u = (year − epoch) / scale`.
struct Segment {
    until: f64,
    epoch: f64,
    scale: f64,
    coefficients: &'static [f64],
}

#[rustfmt::skip]
const SEGMENTS: [Segment; 12] = [
    Segment { until: 500.0, epoch: 0.0, scale: 100.0,
        coefficients: &[10_583.6, -1_014.41, 33.783_11, -5.952_053, -0.179_845_2, 0.022_174_192, 0.009_031_652_1] },
    Segment { until: 1600.0, epoch: 1000.0, scale: 100.0,
        coefficients: &[1_574.2, -556.01, 71.234_72, 0.319_781, -0.850_346_3, -0.005_050_998, 0.008_357_207_3] },
    Segment { until: 1700.0, epoch: 1600.0, scale: 1.0,
        coefficients: &[120.0, -0.980_8, -0.015_32, 1.0 / 7_129.0] },
    Segment { until: 1800.0, epoch: 1700.0, scale: 1.0,
        coefficients: &[8.83, 0.160_3, -0.005_928_5, 0.000_133_36, -1.0 / 1_174_000.0] },
    Segment { until: 1860.0, epoch: 1800.0, scale: 1.0,
        coefficients: &[13.72, -0.332_447, 0.006_861_2, 0.004_111_6, -0.000_374_36,
                        0.000_012_127_2, -0.000_000_169_9, 0.000_000_000_875] },
    Segment { until: 1900.0, epoch: 1860.0, scale: 1.0,
        coefficients: &[7.62, 0.573_7, -0.251_754, 0.016_806_68, -0.000_447_362_4, 1.0 / 233_174.0] },
    Segment { until: 1920.0, epoch: 1900.0, scale: 1.0,
        coefficients: &[-2.79, 1.494_119, -0.059_893_9, 0.006_196_6, -0.000_197] },
    Segment { until: 1941.0, epoch: 1920.0, scale: 1.0,
        coefficients: &[21.20, 0.844_93, -0.076_100, 0.002_093_6] },
    Segment { until: 1961.0, epoch: 1950.0, scale: 1.0,
        coefficients: &[29.07, 0.407, -1.0 / 233.0, 1.0 / 2_547.0] },
    Segment { until: 1986.0, epoch: 1975.0, scale: 1.0,
        coefficients: &[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0] },
    Segment { until: 2005.0, epoch: 2000.0, scale: 1.0,
        coefficients: &[63.86, 0.334_5, -0.060_374, 0.001_727_5, 0.000_651_814, 0.000_023_735_99] },
    Segment { until: 2050.0, epoch: 2000.0, scale: 1.0,
        coefficients: &[62.92, 0.322_17, 0.005_589] },
];

/// Decimal (Gregorian) year of a UT instant.
#[inline]
fn decimal_year(jd_ut: Time<UT>) -> f64 {
    2000.0 + ((jd_ut - JD_YEAR_2000_UT) / GREGORIAN_YEAR).simplify().value()
}

/// Horner evaluation of `Σ cₖ·uᵏ`.
#[inline]
fn polynomial(coefficients: &[f64], u: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, c| acc * u + c)
}

/// Morrison & Stephenson long-term parabola.
#[inline]
fn long_term(year: f64) -> f64 {
    let u = (year - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u
}

/// Returns **ΔT** for an instant on the **UT** axis.
pub(crate) fn delta_t_seconds(jd_ut: Time<UT>) -> Seconds {
    let year = decimal_year(jd_ut);
    let dt = match year {
        y if y < -500.0 => long_term(y),
        y if y < 2050.0 => SEGMENTS
            .iter()
            .find(|s| y < s.until)
            .map(|s| polynomial(s.coefficients, (y - s.epoch) / s.scale))
            .unwrap_or_else(|| long_term(y)),
        // Blend that joins the 2005–2050 fit onto the parabola at 2150.
        y if y < 2150.0 => long_term(y) - 0.562_8 * (2150.0 - y),
        y => long_term(y),
    };
    Seconds::new(dt)
}

impl Time<UT> {
    /// Returns **ΔT = TT − UT** in seconds for this UT epoch.
    #[inline]
    pub fn delta_t(&self) -> Seconds {
        delta_t_seconds(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_year(year: f64) -> Time<UT> {
        JD_YEAR_2000_UT + Days::new(GREGORIAN_YEAR.value() * (year - 2000.0))
    }

    #[test]
    fn decimal_year_of_j2000() {
        assert!((decimal_year(Time::<UT>::new(2_451_545.0)) - 2000.001_369).abs() < 1e-5);
    }

    #[test]
    fn delta_t_2000() {
        let dt = delta_t_seconds(Time::<UT>::new(2_451_545.0));
        assert!((dt - Seconds::new(63.86)).abs() < Seconds::new(0.1));
    }

    #[test]
    fn delta_t_modern_samples() {
        // Observed values: 1950 ≈ 29.1 s, 1975 ≈ 45.5 s, 2020 ≈ 69.4 s.
        for (year, expected, tol) in [(1950.0, 29.07, 0.2), (1975.0, 45.45, 0.2), (2020.0, 71.6, 2.5)] {
            let dt = delta_t_seconds(at_year(year));
            assert!(
                (dt - Seconds::new(expected)).abs() < Seconds::new(tol),
                "ΔT({year}) = {dt}"
            );
        }
    }

    #[test]
    fn delta_t_long_term_branches() {
        let ancient = delta_t_seconds(at_year(-1000.0));
        assert!((ancient - Seconds::new(long_term(-1000.0))).abs() < Seconds::new(1e-6));

        let far = delta_t_seconds(at_year(2500.0));
        assert!((far - Seconds::new(long_term(2500.0))).abs() < Seconds::new(1e-6));
    }

    #[test]
    fn delta_t_is_continuous_enough_at_2050_and_2150() {
        let before = delta_t_seconds(at_year(2049.999)).value();
        let after = delta_t_seconds(at_year(2050.001)).value();
        assert!((before - after).abs() < 1.0, "jump {before} → {after}");

        let before = delta_t_seconds(at_year(2149.999)).value();
        let after = delta_t_seconds(at_year(2150.001)).value();
        assert!((before - after).abs() < 0.01, "jump {before} → {after}");
    }

    #[test]
    fn delta_t_convenience_method() {
        let ut = Time::<UT>::new(2_451_545.0);
        assert_eq!(ut.delta_t(), delta_t_seconds(ut));
    }
}
