//! Clock formatting of decimal hours.

use miqat_types::FormatConfig;

/// A decimal hour split into whole hours and rounded minutes.
///
/// `hours` is not normalized: Isha at high latitudes can spill past 24
/// and Fajr can fall before 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hours: i32,
    pub minutes: u32,
}

impl ClockTime {
    /// `hours = floor(h)`, `minutes = round(frac * 60)`, carrying 60 into the hour.
    pub fn from_decimal_hour(decimal_hour: f64) -> Self {
        let floor = decimal_hour.floor();
        let mut hours = floor as i32;
        let mut minutes = ((decimal_hour - floor) * 60.0).round() as u32;
        if minutes >= 60 {
            minutes = 0;
            hours += 1;
        }
        Self { hours, minutes }
    }

    /// Minutes since midnight, un-normalized.
    pub fn total_minutes(&self) -> i64 {
        self.hours as i64 * 60 + self.minutes as i64
    }

    /// Hours folded into 0..24.
    pub fn normalized_hours(&self) -> u32 {
        self.hours.rem_euclid(24) as u32
    }

    /// Zero-padded 24-hour `HH:MM`.
    pub fn to_24h(&self) -> String {
        format!("{:02}:{:02}", self.normalized_hours(), self.minutes)
    }

    /// 12-hour clock, e.g. `4:05am`, `12:30pm`, with localized digits.
    pub fn to_12h(&self, format: &FormatConfig) -> String {
        let hours = self.normalized_hours();
        let twelve = match hours % 12 {
            0 => 12,
            h => h,
        };
        let suffix = if hours >= 12 { "pm" } else { "am" };
        let digits = format.localize_digits(&format!("{}:{:02}", twelve, self.minutes));
        format!("{}{}", digits, suffix)
    }
}
