//! Plain-text tables for the terminal.

use std::fmt::Write;

use chrono::{DateTime, Utc};
use miqat_core::network::LocationInfo;
use miqat_core::{time_remaining, Prayer, PrayerEventSet, TimetableDay};

const RULE: &str = "==========================================================";

/// Today's five times with the ongoing marker and the next-prayer countdown.
pub fn today(location: &LocationInfo, set: &PrayerEventSet, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  📍 {}", location.display_name());
    let _ = writeln!(out, "  📅 {}", set.evaluated_at.format("%A, %d %B %Y (UTC%:z)"));
    let _ = writeln!(out, "{}", RULE);

    for event in set {
        let marker = if event.ongoing {
            "◀ now"
        } else if event.passed {
            "✓"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  {:<8} {:>8}  {:>5}  {}",
            event.prayer.name(),
            event.display_time,
            event.time,
            marker
        );
    }

    let _ = writeln!(out, "{}", RULE);
    match set.next_after(now) {
        Some(next) => {
            let _ = writeln!(out, "  Next: {} in {}", next.prayer, time_remaining(next, now));
        }
        None => {
            let _ = writeln!(out, "  All prayers for today have started.");
        }
    }
    out
}

/// One line per day, 12-hour times in the configured numerals.
pub fn timetable(location: &LocationInfo, rows: &[TimetableDay]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "  📍 {}", location.display_name());
    if let Some(first) = rows.first() {
        let _ = writeln!(out, "  📅 {}", first.date.format("%B %Y"));
    }
    let _ = writeln!(out, "{}", RULE);

    let _ = write!(out, "  {:<10}", "Date");
    for prayer in Prayer::ALL {
        let _ = write!(out, " {:>8}", prayer.name());
    }
    let _ = writeln!(out);

    for row in rows {
        let _ = write!(out, "  {:<10}", row.date.format("%a %d"));
        for event in &row.times {
            let _ = write!(out, " {:>8}", event.display_time);
        }
        let _ = writeln!(out);
    }
    out
}
