//! Longitude-based timezone estimation.
//!
//! The calculator never trusts the device's configured timezone to decide
//! which calendar day it is computing; it derives a coarse political offset
//! from the longitude (15° per hour) instead.

use chrono::{DateTime, Duration, FixedOffset, NaiveDateTime};

/// Estimated UTC offset in minutes: `floor(|lng| / 15) * sign(lng) * 60`.
///
/// Truncates toward the prime meridian, so Toronto (-79.38°) gets -300.
pub fn estimate_offset_minutes(lng: f64) -> i32 {
    if lng == 0.0 || !lng.is_finite() {
        return 0;
    }
    let hours = (lng.abs() / 15.0).floor() * lng.signum();
    (hours * 60.0) as i32
}

/// Shifts `at` onto the wall clock of the estimated timezone for `lng`.
///
/// Equivalent to removing `at`'s own UTC offset and applying the estimated one.
pub fn neutralize(at: DateTime<FixedOffset>, lng: f64) -> NaiveDateTime {
    at.naive_utc() + Duration::minutes(estimate_offset_minutes(lng) as i64)
}

/// UTC offset of `at` in hours, positive east of Greenwich.
pub fn offset_hours(at: &DateTime<FixedOffset>) -> f64 {
    at.offset().local_minus_utc() as f64 / 3600.0
}
