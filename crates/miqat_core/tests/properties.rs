use chrono::{DateTime, Duration, FixedOffset, NaiveDate, TimeZone};
use miqat_core::prelude::*;
use proptest::prelude::*;

fn instant(days: i64, seconds: i64, offset_minutes: i32) -> DateTime<FixedOffset> {
    let base = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let offset = FixedOffset::east_opt(offset_minutes * 60).unwrap();
    offset
        .from_utc_datetime(&(base + Duration::days(days) + Duration::seconds(seconds)))
}

fn calc(at: DateTime<FixedOffset>, lat: f64, lng: f64) -> PrayerEventSet {
    calculate_prayer_times(
        at,
        GeoCoordinate::new(lat, lng).unwrap(),
        &CalculationParams::default(),
        &FormatConfig::default(),
    )
}

proptest! {
    /// Invariant: outside the polar circles the events follow the sun.
    #[test]
    fn events_are_ordered_outside_polar_circle(
        lat in -66.0f64..=66.0,
        lng in -180.0f64..=180.0,
        days in 0i64..18_250,
    ) {
        let set = calc(instant(days, 43_200, 0), lat, lng);
        let h = |p: Prayer| set[p].decimal_hour;

        prop_assert!(h(Prayer::Fajr) < h(Prayer::Dhuhr), "{:?}", set);
        prop_assert!(h(Prayer::Dhuhr) < h(Prayer::Maghrib), "{:?}", set);
        prop_assert!(h(Prayer::Maghrib) <= h(Prayer::Isha), "{:?}", set);
        prop_assert!(h(Prayer::Dhuhr) <= h(Prayer::Asr), "{:?}", set);
    }

    /// Invariant: the hour-angle clamp keeps every latitude finite.
    #[test]
    fn never_nan(
        lat in -90.0f64..=90.0,
        lng in -180.0f64..=180.0,
        days in 0i64..18_250,
    ) {
        let set = calc(instant(days, 0, 0), lat, lng);
        for event in &set {
            prop_assert!(event.decimal_hour.is_finite(), "{} at lat {} is {}", event.prayer, lat, event.decimal_hour);
        }
    }

    /// Invariant: at most one event is ongoing, and it is never also passed.
    #[test]
    fn at_most_one_ongoing(
        lat in -66.0f64..=66.0,
        lng in -180.0f64..=180.0,
        days in 0i64..18_250,
        seconds in 0i64..86_400,
    ) {
        let set = calc(instant(days, seconds, 0), lat, lng);
        let ongoing: Vec<_> = set.iter().filter(|e| e.ongoing).collect();
        prop_assert!(ongoing.len() <= 1);
        for event in ongoing {
            prop_assert!(!event.passed);
        }
        // Nothing after the ongoing event has passed.
        if let Some(current) = set.ongoing() {
            for event in set.iter().filter(|e| e.prayer > current.prayer) {
                prop_assert!(!event.passed, "{} passed after ongoing {}", event.prayer, current.prayer);
            }
        }
    }

    /// Invariant: same inputs, same outputs.
    #[test]
    fn deterministic(
        lat in -90.0f64..=90.0,
        lng in -180.0f64..=180.0,
        days in 0i64..18_250,
        seconds in 0i64..86_400,
    ) {
        let at = instant(days, seconds, 0);
        prop_assert_eq!(calc(at, lat, lng), calc(at, lat, lng));
    }

    /// Invariant: `time` is the rounded decimal hour, folded into one day.
    #[test]
    fn time_matches_decimal_hour(
        lat in -66.0f64..=66.0,
        lng in -180.0f64..=180.0,
        days in 0i64..18_250,
    ) {
        let set = calc(instant(days, 43_200, 0), lat, lng);
        for event in &set {
            let minutes = event.decimal_hour * 60.0;
            let expected = (minutes.round() as i64).rem_euclid(1440);
            let actual = event.minute_of_day().unwrap() as i64;
            // `floor + round(frac)` and `round(whole)` can only disagree on an exact half minute.
            let on_half = ((minutes - minutes.floor()) - 0.5).abs() < 1e-6;
            prop_assert!(actual == expected || on_half, "{}: {} vs {}", event.prayer, actual, expected);
        }
    }

    /// Invariant: the device timezone only moves the clock, never the day computed.
    #[test]
    fn device_offset_only_shifts_clock(
        lat in -66.0f64..=66.0,
        lng in -180.0f64..=180.0,
        days in 0i64..18_250,
        offset_hours in -11i32..=11,
    ) {
        let utc = calc(instant(days, 43_200, 0), lat, lng);
        let local = calc(instant(days, 43_200, offset_hours * 60), lat, lng);
        for (a, b) in utc.iter().zip(local.iter()) {
            let shift = b.decimal_hour - a.decimal_hour;
            prop_assert!((shift - offset_hours as f64).abs() < 1e-9, "{} shifted by {}", a.prayer, shift);
            prop_assert_eq!(a.start_timestamp, b.start_timestamp);
        }
    }
}
