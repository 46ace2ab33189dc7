//! Countdown helpers.
//!
//! Stateless: every function takes the current instant explicitly, so the
//! same event can be rendered against a ticking clock without mutation.

use chrono::{DateTime, Utc};
use miqat_types::PrayerEvent;

/// Seconds until `event` starts. Negative once it has started.
pub fn seconds_remaining(event: &PrayerEvent, now: DateTime<Utc>) -> i64 {
    event.start_timestamp - now.timestamp()
}

/// Minutes until `event` starts, fractional.
pub fn minutes_remaining(event: &PrayerEvent, now: DateTime<Utc>) -> f64 {
    seconds_remaining(event, now) as f64 / 60.0
}

/// Human-readable time until `event` starts, e.g. `1h 2m 3s`.
///
/// Empty once the event has started.
pub fn time_remaining(event: &PrayerEvent, now: DateTime<Utc>) -> String {
    humanize_seconds(seconds_remaining(event, now))
}

/// Formats a positive number of seconds as `Xh Ym Zs`, omitting zero parts.
pub fn humanize_seconds(seconds: i64) -> String {
    if seconds <= 0 {
        return String::new();
    }
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;
    let secs = seconds % 60;

    let mut parts = Vec::with_capacity(3);
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if secs > 0 {
        parts.push(format!("{}s", secs));
    }
    parts.join(" ")
}
