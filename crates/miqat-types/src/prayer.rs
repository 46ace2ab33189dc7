//! Prayer events and the daily event set.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use crate::{CalculationParams, FormatConfig, GeoCoordinate};

/// The five daily prayers, in canonical (chronological) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// All prayers in canonical order.
    pub const ALL: [Prayer; 5] = [Prayer::Fajr, Prayer::Dhuhr, Prayer::Asr, Prayer::Maghrib, Prayer::Isha];

    /// Position in canonical order.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Prayer::Fajr => "Fajr",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single computed prayer time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerEvent {
    pub prayer: Prayer,
    /// Hour of day as a real number. May fall outside [0, 24).
    pub decimal_hour: f64,
    /// 12-hour clock string, e.g. `4:05am`.
    pub display_time: String,
    /// 24-hour `HH:MM`, hours normalized into 0..24.
    pub time: String,
    /// Start of the event in epoch seconds.
    pub start_timestamp: i64,
    pub passed: bool,
    pub ongoing: bool,
}

impl PrayerEvent {
    /// Start of the event as a UTC instant.
    pub fn start_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.start_timestamp, 0)
    }

    /// Minutes since midnight encoded in `time`.
    pub fn minute_of_day(&self) -> Option<u32> {
        let (h, m) = self.time.split_once(':')?;
        Some(h.parse::<u32>().ok()? * 60 + m.parse::<u32>().ok()?)
    }
}

/// The five prayer events for one day, plus the inputs that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrayerEventSet {
    pub coords: GeoCoordinate,
    pub params: CalculationParams,
    pub format: FormatConfig,
    /// Instant (with its local UTC offset) the set was evaluated at.
    pub evaluated_at: DateTime<FixedOffset>,
    events: [PrayerEvent; 5],
}

impl PrayerEventSet {
    /// Assembles a set. `events` must be in canonical order.
    pub fn new(
        coords: GeoCoordinate,
        params: CalculationParams,
        format: FormatConfig,
        evaluated_at: DateTime<FixedOffset>,
        events: [PrayerEvent; 5],
    ) -> Self {
        debug_assert!(events.iter().zip(Prayer::ALL).all(|(e, p)| e.prayer == p));
        Self { coords, params, format, evaluated_at, events }
    }

    pub fn get(&self, prayer: Prayer) -> &PrayerEvent {
        &self.events[prayer.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &PrayerEvent> {
        self.events.iter()
    }

    pub fn events(&self) -> &[PrayerEvent; 5] {
        &self.events
    }

    /// The event currently in progress, if any has started.
    pub fn ongoing(&self) -> Option<&PrayerEvent> {
        self.events.iter().find(|e| e.ongoing)
    }

    /// First event, in canonical order, that starts after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<&PrayerEvent> {
        let now = now.timestamp();
        self.events.iter().find(|e| e.start_timestamp > now)
    }
}

impl Index<Prayer> for PrayerEventSet {
    type Output = PrayerEvent;

    fn index(&self, prayer: Prayer) -> &PrayerEvent {
        self.get(prayer)
    }
}

impl<'a> IntoIterator for &'a PrayerEventSet {
    type Item = &'a PrayerEvent;
    type IntoIter = std::slice::Iter<'a, PrayerEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(prayer: Prayer, ts: i64, ongoing: bool) -> PrayerEvent {
        PrayerEvent {
            prayer,
            decimal_hour: 0.0,
            display_time: String::new(),
            time: "05:07".to_string(),
            start_timestamp: ts,
            passed: false,
            ongoing,
        }
    }

    fn sample_set() -> PrayerEventSet {
        let at = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let events = [
            event(Prayer::Fajr, 100, false),
            event(Prayer::Dhuhr, 200, true),
            event(Prayer::Asr, 300, false),
            event(Prayer::Maghrib, 400, false),
            event(Prayer::Isha, 500, false),
        ];
        PrayerEventSet::new(
            GeoCoordinate::new_unchecked(0.0, 0.0),
            CalculationParams::default(),
            FormatConfig::default(),
            at,
            events,
        )
    }

    #[test]
    fn test_prayer_order_and_names() {
        assert!(Prayer::Fajr < Prayer::Isha);
        assert_eq!(Prayer::Maghrib.index(), 3);
        assert_eq!(Prayer::from_name("asr"), Some(Prayer::Asr));
        assert_eq!(Prayer::from_name("sunrise"), None);
        assert_eq!(Prayer::Isha.to_string(), "Isha");
    }

    #[test]
    fn test_index_and_ongoing() {
        let set = sample_set();
        assert_eq!(set[Prayer::Asr].start_timestamp, 300);
        assert_eq!(set.ongoing().map(|e| e.prayer), Some(Prayer::Dhuhr));
        assert_eq!(set.iter().count(), 5);
    }

    #[test]
    fn test_next_after() {
        let set = sample_set();
        let at = |s| DateTime::from_timestamp(s, 0).unwrap();
        assert_eq!(set.next_after(at(250)).map(|e| e.prayer), Some(Prayer::Asr));
        assert_eq!(set.next_after(at(300)).map(|e| e.prayer), Some(Prayer::Maghrib));
        assert!(set.next_after(at(500)).is_none());
    }

    #[test]
    fn test_minute_of_day() {
        assert_eq!(event(Prayer::Fajr, 0, false).minute_of_day(), Some(307));
    }

    #[test]
    fn test_serde_roundtrip_keeps_events() {
        let set = sample_set();
        let json = serde_json::to_string(&set).unwrap();
        let back: PrayerEventSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
