//! Prayer Times Calculation Module.
//!
//! Computes Fajr, Dhuhr, Asr, Maghrib and Isha from the solar declination
//! and equation of time of a single day, then turns the decimal hours into
//! `PrayerEvent`s with clock strings, timestamps and passed/ongoing status.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Local, NaiveDate, NaiveTime, Timelike};
use log::debug;
use miqat_types::{CalculationParams, FormatConfig, GeoCoordinate, Prayer, PrayerEvent, PrayerEventSet};

use crate::format::ClockTime;
use crate::solar::{asr_elevation, hour_angle, julian_date, SolarTerms};
use crate::timezone::{neutralize, offset_hours};

/// Local clock hour of solar noon.
///
/// `utc_offset_hours` is positive east of Greenwich. `equation_of_time` is
/// taken as minutes of time.
pub fn solar_noon(lng: f64, utc_offset_hours: f64, equation_of_time: f64) -> f64 {
    12.0 - lng / 15.0 + utc_offset_hours + equation_of_time / 60.0
}

/// Decimal hours of the five prayers on `date`, in canonical order.
///
/// Pure function of its inputs; hours are on the clock of `utc_offset_hours`.
pub fn prayer_hours(
    date: NaiveDate,
    coords: GeoCoordinate,
    utc_offset_hours: f64,
    params: &CalculationParams,
) -> [f64; 5] {
    let terms = SolarTerms::new(julian_date(date.year(), date.month(), date.day()));
    let declination = terms.declination();
    let noon = solar_noon(coords.lng, utc_offset_hours, terms.equation_of_time());

    let fajr = noon - hour_angle(declination, coords.lat, params.fajr_angle) / 15.0;
    let asr = noon + hour_angle(declination, coords.lat, asr_elevation(coords.lat, declination)) / 15.0;
    let maghrib = noon + hour_angle(declination, coords.lat, params.maghrib_angle) / 15.0;
    let isha = noon + hour_angle(declination, coords.lat, params.isha_angle) / 15.0;

    [fajr, noon, asr, maghrib, isha]
}

/// Calculates the prayer event set for the day containing `at`.
///
/// # Arguments
/// * `at` - Evaluation instant with the local UTC offset. Its neutralized
///   date picks the day and its clock decides `passed`/`ongoing`; `at`'s
///   own offset is the clock the times are shown on.
/// * `coords` - Geographic coordinates (latitude, longitude)
/// * `params` - Elevation angles for Fajr, Maghrib and Isha
/// * `format` - Numerals for `display_time`
///
/// # Example
/// ```rust
/// use chrono::{FixedOffset, TimeZone};
/// use miqat_types::{CalculationParams, FormatConfig, GeoCoordinate, Prayer};
/// use miqat_astronomy::prayer::calculate_prayer_times;
///
/// let at = FixedOffset::west_opt(4 * 3600).unwrap()
///     .with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
/// let toronto = GeoCoordinate::new(43.65, -79.38).unwrap();
///
/// let times = calculate_prayer_times(at, toronto, &CalculationParams::default(), &FormatConfig::default());
/// println!("Dhuhr: {}", times[Prayer::Dhuhr].display_time);
/// ```
pub fn calculate_prayer_times(
    at: DateTime<FixedOffset>,
    coords: GeoCoordinate,
    params: &CalculationParams,
    format: &FormatConfig,
) -> PrayerEventSet {
    let neutral = neutralize(at, coords.lng);
    debug!("neutralized {} to {} (lng {})", at, neutral, coords.lng);

    let date = neutral.date();
    let hours = prayer_hours(date, coords, offset_hours(&at), params);
    debug!("decimal hours for {} at ({}, {}): {:?}", date, coords.lat, coords.lng, hours);

    let now_minutes = neutral.hour() as i64 * 60 + neutral.minute() as i64;
    let midnight = date.and_time(NaiveTime::MIN);
    let offset_seconds = at.offset().local_minus_utc() as i64;

    let mut events = Prayer::ALL.map(|prayer| {
        let decimal_hour = hours[prayer.index()];
        let clock = ClockTime::from_decimal_hour(decimal_hour);
        // Overflowing minutes roll into the neighbouring day.
        let wall_clock = midnight + Duration::minutes(clock.total_minutes());

        PrayerEvent {
            prayer,
            decimal_hour,
            display_time: clock.to_12h(format),
            time: clock.to_24h(),
            start_timestamp: wall_clock.and_utc().timestamp() - offset_seconds,
            passed: now_minutes - clock.total_minutes() > 0,
            ongoing: false,
        }
    });
    mark_ongoing(&mut events);

    PrayerEventSet::new(coords, *params, *format, at, events)
}

/// Same as [`calculate_prayer_times`] evaluated at the local clock's "now".
pub fn calculate_prayer_times_now(
    coords: GeoCoordinate,
    params: &CalculationParams,
    format: &FormatConfig,
) -> PrayerEventSet {
    calculate_prayer_times(Local::now().fixed_offset(), coords, params, format)
}

/// Recomputes `set` for its own coordinates, params and format at "now".
pub fn refresh(set: &PrayerEventSet) -> PrayerEventSet {
    refresh_at(set, Local::now().fixed_offset())
}

/// Recomputes `set` for its own coordinates, params and format at `at`.
pub fn refresh_at(set: &PrayerEventSet, at: DateTime<FixedOffset>) -> PrayerEventSet {
    calculate_prayer_times(at, set.coords, &set.params, &set.format)
}

/// The last passed event (canonical order) becomes the ongoing one.
fn mark_ongoing(events: &mut [PrayerEvent]) {
    if let Some(current) = events.iter_mut().rev().find(|e| e.passed) {
        current.passed = false;
        current.ongoing = true;
    }
}
