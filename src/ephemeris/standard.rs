// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Standard-accuracy ephemeris.
//!
//! Sun: geometric theory of Meeus ch. 25 with aberration and the dominant
//! nutation term.  Moon: the truncated ELP-2000/82 series of Meeus ch. 47
//! (60 longitude/distance and 60 latitude terms), low-precision nutation,
//! and topocentric parallax for a sea-level observer.

use super::{
    ecliptic_to_equatorial, mean_obliquity, nutation, BodyPosition, EphemerisAlgorithm,
    ValidityWindow, ASTRONOMICAL_UNIT_KM,
};
use crate::angles::{rad, wrap_360};
use crate::frames::{Direction, Equatorial};
use crate::instant::Time;
use crate::observer::Location;
use crate::scales::{JD, UT};
use crate::sidereal::local_sidereal_time;

/// Periodic terms for the moon's longitude (1e-6 °) and distance (1e-3 km):
/// multiples of D, M, M', F followed by the sine and cosine coefficients.
#[rustfmt::skip]
const LONGITUDE_DISTANCE_TERMS: [(i8, i8, i8, i8, i32, i32); 60] = [
    (0, 0, 1, 0, 6_288_774, -20_905_355),
    (2, 0, -1, 0, 1_274_027, -3_699_111),
    (2, 0, 0, 0, 658_314, -2_955_968),
    (0, 0, 2, 0, 213_618, -569_925),
    (0, 1, 0, 0, -185_116, 48_888),
    (0, 0, 0, 2, -114_332, -3_149),
    (2, 0, -2, 0, 58_793, 246_158),
    (2, -1, -1, 0, 57_066, -152_138),
    (2, 0, 1, 0, 53_322, -170_733),
    (2, -1, 0, 0, 45_758, -204_586),
    (0, 1, -1, 0, -40_923, -129_620),
    (1, 0, 0, 0, -34_720, 108_743),
    (0, 1, 1, 0, -30_383, 104_755),
    (2, 0, 0, -2, 15_327, 10_321),
    (0, 0, 1, 2, -12_528, 0),
    (0, 0, 1, -2, 10_980, 79_661),
    (4, 0, -1, 0, 10_675, -34_782),
    (0, 0, 3, 0, 10_034, -23_210),
    (4, 0, -2, 0, 8_548, -21_636),
    (2, 1, -1, 0, -7_888, 24_208),
    (2, 1, 0, 0, -6_766, 30_824),
    (1, 0, -1, 0, -5_163, -8_379),
    (1, 1, 0, 0, 4_987, -16_675),
    (2, -1, 1, 0, 4_036, -12_831),
    (2, 0, 2, 0, 3_994, -10_445),
    (4, 0, 0, 0, 3_861, -11_650),
    (2, 0, -3, 0, 3_665, 14_403),
    (0, 1, -2, 0, -2_689, -7_003),
    (2, 0, -1, 2, -2_602, 0),
    (2, -1, -2, 0, 2_390, 10_056),
    (1, 0, 1, 0, -2_348, 6_322),
    (2, -2, 0, 0, 2_236, -9_884),
    (0, 1, 2, 0, -2_120, 5_751),
    (0, 2, 0, 0, -2_069, 0),
    (2, -2, -1, 0, 2_048, -4_950),
    (2, 0, 1, -2, -1_773, 4_130),
    (2, 0, 0, 2, -1_595, 0),
    (4, -1, -1, 0, 1_215, -3_958),
    (0, 0, 2, 2, -1_110, 0),
    (3, 0, -1, 0, -892, 3_258),
    (2, 1, 1, 0, -810, 2_616),
    (4, -1, -2, 0, 759, -1_897),
    (0, 2, -1, 0, -713, -2_117),
    (2, 2, -1, 0, -700, 2_354),
    (2, 1, -2, 0, 691, 0),
    (2, -1, 0, -2, 596, 0),
    (4, 0, 1, 0, 549, -1_423),
    (0, 0, 4, 0, 537, -1_117),
    (4, -1, 0, 0, 520, -1_571),
    (1, 0, -2, 0, -487, -1_739),
    (2, 1, 0, -2, -399, 0),
    (0, 0, 2, -2, -381, -4_421),
    (1, 1, 1, 0, 351, 0),
    (3, 0, -2, 0, -340, 0),
    (4, 0, -3, 0, 330, 0),
    (2, -1, 2, 0, 327, 0),
    (0, 2, 1, 0, -323, 1_165),
    (1, 1, -1, 0, 299, 0),
    (2, 0, 3, 0, 294, 0),
    (2, 0, -1, -2, 0, 8_752),
];

/// Periodic terms for the moon's latitude (1e-6 °).
#[rustfmt::skip]
const LATITUDE_TERMS: [(i8, i8, i8, i8, i32); 60] = [
    (0, 0, 0, 1, 5_128_122),
    (0, 0, 1, 1, 280_602),
    (0, 0, 1, -1, 277_693),
    (2, 0, 0, -1, 173_237),
    (2, 0, -1, 1, 55_413),
    (2, 0, -1, -1, 46_271),
    (2, 0, 0, 1, 32_573),
    (0, 0, 2, 1, 17_198),
    (2, 0, 1, -1, 9_266),
    (0, 0, 2, -1, 8_822),
    (2, -1, 0, -1, 8_216),
    (2, 0, -2, -1, 4_324),
    (2, 0, 1, 1, 4_200),
    (2, 1, 0, -1, -3_359),
    (2, -1, -1, 1, 2_463),
    (2, -1, 0, 1, 2_211),
    (2, -1, -1, -1, 2_065),
    (0, 1, -1, -1, -1_870),
    (4, 0, -1, -1, 1_828),
    (0, 1, 0, 1, -1_794),
    (0, 0, 0, 3, -1_749),
    (0, 1, -1, 1, -1_565),
    (1, 0, 0, 1, -1_491),
    (0, 1, 1, 1, -1_475),
    (0, 1, 1, -1, -1_410),
    (0, 1, 0, -1, -1_344),
    (1, 0, 0, -1, -1_335),
    (0, 0, 3, 1, 1_107),
    (4, 0, 0, -1, 1_021),
    (4, 0, -1, 1, 833),
    (0, 0, 1, -3, 777),
    (4, 0, -2, 1, 671),
    (2, 0, 0, -3, 607),
    (2, 0, 2, -1, 596),
    (2, -1, 1, -1, 491),
    (2, 0, -2, 1, -451),
    (0, 0, 3, -1, 439),
    (2, 0, 2, 1, 422),
    (2, 0, -3, -1, 421),
    (2, 1, -1, 1, -366),
    (2, 1, 0, 1, -351),
    (4, 0, 0, 1, 331),
    (2, -1, 1, 1, 315),
    (2, -2, 0, -1, 302),
    (0, 0, 1, 3, -283),
    (2, 1, 1, -1, -229),
    (1, 1, 0, -1, 223),
    (1, 1, 0, 1, 223),
    (0, 1, -2, -1, -220),
    (2, 1, -1, -1, -220),
    (1, 0, 1, 1, -185),
    (2, -1, -2, -1, 181),
    (0, 1, 2, 1, -177),
    (4, 0, -2, -1, 176),
    (4, -1, -1, -1, 166),
    (1, 0, 1, -1, -164),
    (4, 0, 1, -1, 132),
    (1, 0, -1, -1, -119),
    (4, -1, 0, -1, 115),
    (2, -2, 0, 1, 107),
];

/// Apparent ecliptic coordinates of a body, degrees and kilometres.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct EclipticPosition {
    pub longitude: f64,
    pub latitude: f64,
    pub distance_km: f64,
    /// True obliquity of date.
    pub obliquity: f64,
}

impl EclipticPosition {
    fn direction(&self) -> Direction<Equatorial> {
        ecliptic_to_equatorial(self.longitude, self.latitude, self.obliquity)
    }
}

/// Meeus ch. 25 / ch. 47 ephemeris, valid 1900–2100.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct StandardEphemeris;

impl StandardEphemeris {
    pub const NAME: &'static str = "standard";

    /// 1900-01-01 0h to 2100-01-01 0h UT.
    pub const VALIDITY: ValidityWindow =
        ValidityWindow::new(Time::<UT>::new(2_415_020.5), Time::<UT>::new(2_488_069.5));

    pub const fn new() -> Self {
        Self
    }
}

/// Apparent geocentric sun, `t` in Julian centuries TT from J2000.
pub(crate) fn solar_position(t: f64) -> EclipticPosition {
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = 357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t;
    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;

    let mr = rad(m);
    let center = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * mr.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * mr).sin()
        + 0.000_289 * (3.0 * mr).sin();
    let true_longitude = l0 + center;
    let true_anomaly = rad(m + center);
    let radius_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * true_anomaly.cos());

    let omega = rad(125.04 - 1_934.136 * t);
    EclipticPosition {
        longitude: wrap_360(true_longitude - 0.005_69 - 0.004_78 * omega.sin()),
        latitude: 0.0,
        distance_km: radius_au * ASTRONOMICAL_UNIT_KM,
        obliquity: mean_obliquity(t) + 0.002_56 * omega.cos(),
    }
}

/// Apparent geocentric moon, `t` in Julian centuries TT from J2000.
pub(crate) fn lunar_position(t: f64) -> EclipticPosition {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;

    let l_mean = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let m_moon = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095_0 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;

    let a1 = rad(119.75 + 131.849 * t);
    let a2 = rad(53.09 + 479_264.290 * t);
    let a3 = rad(313.45 + 481_266.484 * t);

    let (d, m, m_moon, f) = (rad(d), rad(m), rad(m_moon), rad(f));
    let l_mean_r = rad(l_mean);

    // Terms involving the sun's anomaly shrink with the Earth's eccentricity.
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let eccentricity = |k: i8| match k.abs() {
        1 => e,
        2 => e * e,
        _ => 1.0,
    };
    let argument = |cd: i8, cm: i8, cmm: i8, cf: i8| {
        f64::from(cd) * d + f64::from(cm) * m + f64::from(cmm) * m_moon + f64::from(cf) * f
    };

    let (mut sum_l, mut sum_r) = (0.0, 0.0);
    for &(cd, cm, cmm, cf, sl, sr) in LONGITUDE_DISTANCE_TERMS.iter() {
        let arg = argument(cd, cm, cmm, cf);
        let w = eccentricity(cm);
        sum_l += f64::from(sl) * w * arg.sin();
        sum_r += f64::from(sr) * w * arg.cos();
    }
    let mut sum_b = 0.0;
    for &(cd, cm, cmm, cf, sb) in LATITUDE_TERMS.iter() {
        sum_b += f64::from(sb) * eccentricity(cm) * argument(cd, cm, cmm, cf).sin();
    }

    sum_l += 3_958.0 * a1.sin() + 1_962.0 * (l_mean_r - f).sin() + 318.0 * a2.sin();
    sum_b += -2_235.0 * l_mean_r.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (l_mean_r - m_moon).sin()
        - 115.0 * (l_mean_r + m_moon).sin();

    let (dpsi, deps) = nutation(t);
    EclipticPosition {
        longitude: wrap_360(l_mean + sum_l / 1e6 + dpsi),
        latitude: sum_b / 1e6,
        distance_km: 385_000.56 + sum_r / 1_000.0,
        obliquity: mean_obliquity(t) + deps,
    }
}

impl EphemerisAlgorithm for StandardEphemeris {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validity(&self) -> ValidityWindow {
        Self::VALIDITY
    }

    fn sun(&self, t: Time<UT>, _location: &Location) -> BodyPosition {
        let sun = solar_position(t.to::<JD>().julian_centuries());
        BodyPosition {
            direction: sun.direction(),
            distance_km: sun.distance_km,
        }
    }

    fn moon(&self, t: Time<UT>, location: &Location) -> BodyPosition {
        let moon = lunar_position(t.to::<JD>().julian_centuries());
        let geocentric = moon.direction().vector() * moon.distance_km;
        let lst = local_sidereal_time(t, location.longitude());
        let topocentric = geocentric - location.geocentric_km(lst);
        BodyPosition {
            direction: Direction::new_or_pole(topocentric),
            distance_km: moon.distance_km,
        }
    }
}
