//! Low-precision solar position.
//!
//! Implements:
//! - Gregorian → Julian Day
//! - Solar declination and equation of time from the mean anomaly,
//!   mean longitude and ecliptic longitude of the sun
//! - Hour angle for a target solar elevation
//!
//! Reference: U.S. Naval Observatory, "Approximate Solar Coordinates".

use std::f64::consts::PI;

/// Degrees to radians.
const DEG_TO_RAD: f64 = PI / 180.0;
/// Radians to degrees.
const RAD_TO_DEG: f64 = 180.0 / PI;

/// Julian Day of the J2000.0 epoch.
pub const J2000: f64 = 2451545.0;

/// Julian Day at 0h UT of a Gregorian calendar date.
pub fn julian_date(year: i32, month: u32, day: u32) -> f64 {
    let (mut y, mut m) = (year as f64, month as f64);
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }
    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
}

/// Intermediate solar terms for one Julian Day (degrees).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTerms {
    /// Mean anomaly.
    pub g: f64,
    /// Mean longitude.
    pub q: f64,
    /// Apparent ecliptic longitude.
    pub l: f64,
    /// Obliquity of the ecliptic.
    pub e: f64,
}

impl SolarTerms {
    pub fn new(jd: f64) -> Self {
        let d = jd - J2000;
        // `%` truncates toward zero, so dates before J2000 keep negative angles.
        let g = (357.529 + 0.98560028 * d) % 360.0;
        let q = (280.459 + 0.98564736 * d) % 360.0;
        let l = (q + 1.915 * (g * DEG_TO_RAD).sin() + 0.020 * (2.0 * g * DEG_TO_RAD).sin()) % 360.0;
        let e = 23.439 - 0.00000036 * d;
        Self { g, q, l, e }
    }

    /// Solar declination (degrees).
    pub fn declination(&self) -> f64 {
        ((self.e * DEG_TO_RAD).sin() * (self.l * DEG_TO_RAD).sin()).asin() * RAD_TO_DEG
    }

    /// Equation of time. Used downstream as minutes of time (`/ 60` gives hours).
    pub fn equation_of_time(&self) -> f64 {
        let two_g = 2.0 * self.g * DEG_TO_RAD;
        equation_of_center(self.l, self.q) - 0.00478 * two_g.sin() + 0.000093 * two_g.cos()
    }
}

/// `l - q` folded into [-180, 180).
///
/// `l` and `q` are reduced modulo 360 independently, so near the vernal
/// equinox `l` wraps to ~0 while `q` is still ~359.
fn equation_of_center(l: f64, q: f64) -> f64 {
    let diff = l - q;
    if (-180.0..180.0).contains(&diff) {
        diff
    } else {
        (diff + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Solar declination for a Julian Day (degrees).
pub fn sun_declination(jd: f64) -> f64 {
    SolarTerms::new(jd).declination()
}

/// Equation of time for a Julian Day.
pub fn equation_of_time(jd: f64) -> f64 {
    SolarTerms::new(jd).equation_of_time()
}

/// Hour angle (degrees) at which the sun reaches `angle` degrees of elevation.
///
/// The cosine ratio is clamped to [-1, 1]: in polar day/night the sun never
/// reaches the target and the result saturates to 0° or 180° instead of NaN.
pub fn hour_angle(declination: f64, latitude: f64, angle: f64) -> f64 {
    let lat = latitude * DEG_TO_RAD;
    let dec = declination * DEG_TO_RAD;
    let ratio = ((angle * DEG_TO_RAD).sin() - lat.sin() * dec.sin()) / (lat.cos() * dec.cos());
    let ratio = if ratio.is_nan() { 1.0 } else { ratio.clamp(-1.0, 1.0) };
    ratio.acos() * RAD_TO_DEG
}

/// Elevation angle used for Asr: `90 + atan(1 + tan|lat - dec|)`.
pub fn asr_elevation(latitude: f64, declination: f64) -> f64 {
    let zenith = ((latitude - declination).abs() * DEG_TO_RAD).tan();
    90.0 + (1.0 + zenith).atan() * RAD_TO_DEG
}
