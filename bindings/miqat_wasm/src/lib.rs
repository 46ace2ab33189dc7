//! WASM bindings for Miqat - Solar Prayer Time Calculator
//!
//! Instants cross the boundary as JavaScript epoch milliseconds plus the
//! device UTC offset in minutes (`-new Date().getTimezoneOffset()`).

use chrono::{DateTime, FixedOffset, Utc};
use miqat_core::{
    calculate_prayer_times, refresh_at, time_remaining, CalculationParams, FormatConfig,
    GeoCoordinate, MiqatError, Prayer, PrayerEvent, PrayerEventSet,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Calculates the five prayer times and returns them keyed by prayer name.
///
/// # Example (JavaScript)
/// ```js
/// const now = new Date();
/// const times = calculatePrayerTimes(43.65, -79.38, now.getTime(), -now.getTimezoneOffset(), "en");
/// console.log(times.dhuhr.displayTime); // "1:18pm"
/// ```
#[wasm_bindgen(js_name = calculatePrayerTimes)]
pub fn calculate_prayer_times_js(
    lat: f64,
    lng: f64,
    epoch_millis: f64,
    utc_offset_minutes: i32,
    lang: Option<String>,
) -> Result<WasmPrayerTimes, JsValue> {
    let set = compute(lat, lng, epoch_millis, utc_offset_minutes, lang.as_deref()).map_err(to_js)?;
    Ok(WasmPrayerTimes::from(&set))
}

/// Class-based API holding one day's prayer times.
///
/// # Example (JavaScript)
/// ```js
/// const clock = new PrayerClock(21.42, 39.83, Date.now(), 180, "ar");
/// setInterval(() => {
///   clock.refresh(Date.now(), 180);
///   const next = clock.next(Date.now());
///   if (next) console.log(next.prayer, clock.timeRemaining(next.prayer, Date.now()));
/// }, 1000);
/// ```
#[wasm_bindgen]
pub struct PrayerClock {
    set: PrayerEventSet,
}

#[wasm_bindgen]
impl PrayerClock {
    /// Creates a clock for the given location and instant.
    #[wasm_bindgen(constructor)]
    pub fn new(
        lat: f64,
        lng: f64,
        epoch_millis: f64,
        utc_offset_minutes: i32,
        lang: Option<String>,
    ) -> Result<PrayerClock, JsValue> {
        console_error_panic_hook::set_once();
        let set = compute(lat, lng, epoch_millis, utc_offset_minutes, lang.as_deref()).map_err(to_js)?;
        Ok(PrayerClock { set })
    }

    /// Recomputes the times and passed/ongoing flags for a new instant, in place.
    pub fn refresh(&mut self, epoch_millis: f64, utc_offset_minutes: i32) -> Result<(), JsValue> {
        let at = instant(epoch_millis, utc_offset_minutes).map_err(to_js)?;
        self.set = refresh_at(&self.set, at);
        Ok(())
    }

    /// All five events as a plain object keyed by prayer name.
    pub fn times(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&WasmPrayerTimes::from(&self.set))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Countdown such as `"1h 2m 3s"`; empty once the prayer has started.
    #[wasm_bindgen(js_name = timeRemaining)]
    pub fn time_remaining(&self, prayer: &str, epoch_millis: f64) -> Result<String, JsValue> {
        let prayer = Prayer::from_name(prayer)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown prayer: {}", prayer)))?;
        let now = instant(epoch_millis, 0).map_err(to_js)?;
        Ok(time_remaining(&self.set[prayer], now.with_timezone(&Utc)))
    }

    /// The next prayer to start after `epochMillis`, or `undefined` after Isha.
    pub fn next(&self, epoch_millis: f64) -> Result<Option<WasmPrayerEvent>, JsValue> {
        let now = instant(epoch_millis, 0).map_err(to_js)?;
        Ok(self.set.next_after(now.with_timezone(&Utc)).map(WasmPrayerEvent::from))
    }
}

/// WASM-friendly representation of a PrayerEvent for TypeScript generation.
#[derive(Debug, Clone, PartialEq, Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmPrayerEvent {
    pub prayer: String,
    pub time: String,
    pub display_time: String,
    /// Milliseconds since the epoch, ready for `new Date(...)`.
    pub start_millis: f64,
    pub passed: bool,
    pub ongoing: bool,
}

impl From<&PrayerEvent> for WasmPrayerEvent {
    fn from(event: &PrayerEvent) -> Self {
        Self {
            prayer: event.prayer.name().to_string(),
            time: event.time.clone(),
            display_time: event.display_time.clone(),
            start_millis: event.start_timestamp as f64 * 1000.0,
            passed: event.passed,
            ongoing: event.ongoing,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, tsify::Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct WasmPrayerTimes {
    pub fajr: WasmPrayerEvent,
    pub dhuhr: WasmPrayerEvent,
    pub asr: WasmPrayerEvent,
    pub maghrib: WasmPrayerEvent,
    pub isha: WasmPrayerEvent,
}

impl From<&PrayerEventSet> for WasmPrayerTimes {
    fn from(set: &PrayerEventSet) -> Self {
        let event = |prayer: Prayer| WasmPrayerEvent::from(&set[prayer]);
        Self {
            fajr: event(Prayer::Fajr),
            dhuhr: event(Prayer::Dhuhr),
            asr: event(Prayer::Asr),
            maghrib: event(Prayer::Maghrib),
            isha: event(Prayer::Isha),
        }
    }
}

fn instant(epoch_millis: f64, utc_offset_minutes: i32) -> Result<DateTime<FixedOffset>, MiqatError> {
    let offset = FixedOffset::east_opt(utc_offset_minutes.saturating_mul(60))
        .ok_or_else(|| MiqatError::InvalidDate(format!("UTC offset {} minutes out of range", utc_offset_minutes)))?;
    if !epoch_millis.is_finite() {
        return Err(MiqatError::InvalidDate(format!("{} is not a timestamp", epoch_millis)));
    }
    DateTime::from_timestamp_millis(epoch_millis as i64)
        .map(|utc| utc.with_timezone(&offset))
        .ok_or_else(|| MiqatError::InvalidDate(format!("{} is out of range", epoch_millis)))
}

fn compute(
    lat: f64,
    lng: f64,
    epoch_millis: f64,
    utc_offset_minutes: i32,
    lang: Option<&str>,
) -> Result<PrayerEventSet, MiqatError> {
    let coords = GeoCoordinate::new(lat, lng)?;
    let at = instant(epoch_millis, utc_offset_minutes)?;
    let format = lang.map(FormatConfig::from_language_tag).unwrap_or_default();
    Ok(calculate_prayer_times(at, coords, &CalculationParams::default(), &format))
}

fn to_js(err: MiqatError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
