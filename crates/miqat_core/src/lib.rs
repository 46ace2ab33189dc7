//! Solar prayer time calculator - core logic.
//!
//! Ties the type, astronomy and (optionally) network crates together and
//! provides the high-level entry points.

pub mod timetable;

/// Core types (GeoCoordinate, PrayerEventSet, errors, configuration).
pub mod types {
    pub use miqat_types::*;
}

/// Solar formulas, the calculator, refresh and countdown helpers.
pub mod astronomy {
    pub use miqat_astronomy::*;
}

/// Geolocation providers.
#[cfg(feature = "async")]
pub mod network {
    pub use miqat_network::*;
}

pub use miqat_types::{
    CalculationParams, CalculationParamsBuilder, FormatConfig, GeoCoordinate, MiqatError, Numerals,
    Prayer, PrayerEvent, PrayerEventSet,
};
pub use miqat_astronomy::countdown::{minutes_remaining, seconds_remaining, time_remaining};
pub use miqat_astronomy::prayer::{calculate_prayer_times, calculate_prayer_times_now, refresh, refresh_at};
pub use timetable::{monthly_timetable, TimetableDay};

pub mod prelude {
    pub use crate::types::*;
    pub use crate::{
        calculate, calculate_prayer_times, monthly_timetable, refresh, refresh_at, time_remaining,
        seconds_remaining, minutes_remaining, TimetableDay,
    };
    #[cfg(feature = "async")]
    pub use crate::locate_and_calculate;
}

use chrono::{DateTime, FixedOffset};

/// Validates raw coordinates and calculates with default params and Latin numerals.
///
/// `at` defaults to the local "now".
///
/// # Errors
/// Returns `MiqatError::InvalidCoordinate` if latitude/longitude are out of range.
pub fn calculate(lat: f64, lng: f64, at: Option<DateTime<FixedOffset>>) -> Result<PrayerEventSet, MiqatError> {
    let coords = GeoCoordinate::new(lat, lng)?;
    let params = CalculationParams::default();
    let format = FormatConfig::default();
    Ok(match at {
        Some(at) => calculate_prayer_times(at, coords, &params, &format),
        None => calculate_prayer_times_now(coords, &params, &format),
    })
}

/// Locates the user with `provider`, then calculates for `at`.
///
/// The calculator is not invoked when no location could be determined.
#[cfg(feature = "async")]
pub async fn locate_and_calculate<P>(
    provider: &P,
    at: DateTime<FixedOffset>,
    params: &CalculationParams,
    format: &FormatConfig,
) -> Result<(network::LocationInfo, PrayerEventSet), MiqatError>
where
    P: network::GeolocationProvider,
{
    let location = provider.locate().await?;
    log::info!("calculating prayer times for {}", location.display_name());
    let set = calculate_prayer_times(at, location.coords, params, format);
    Ok((location, set))
}
