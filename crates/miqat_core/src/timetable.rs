//! Monthly timetable.

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime};
use miqat_astronomy::prayer::calculate_prayer_times;
use miqat_types::{CalculationParams, FormatConfig, GeoCoordinate, MiqatError, PrayerEventSet};

/// One row of a timetable.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableDay {
    pub date: NaiveDate,
    pub times: PrayerEventSet,
}

/// Prayer times for every day of `year`-`month`, on the clock of `offset`.
///
/// Each day is evaluated at local noon, so `passed`/`ongoing` reflect midday.
///
/// # Errors
/// Returns `MiqatError::InvalidDate` if the month does not exist.
pub fn monthly_timetable(
    coords: GeoCoordinate,
    year: i32,
    month: u32,
    offset: FixedOffset,
    params: &CalculationParams,
    format: &FormatConfig,
) -> Result<Vec<TimetableDay>, MiqatError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| MiqatError::InvalidDate(format!("{}-{:02}", year, month)))?;
    let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);

    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .map(|date| {
            let at = date
                .and_time(noon)
                .and_local_timezone(offset)
                .single()
                .ok_or_else(|| MiqatError::InvalidDate(date.to_string()))?;
            Ok(TimetableDay { date, times: calculate_prayer_times(at, coords, params, format) })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use miqat_types::Prayer;

    fn mecca() -> GeoCoordinate {
        GeoCoordinate::new_unchecked(21.4225, 39.8262)
    }

    fn ast() -> FixedOffset {
        FixedOffset::east_opt(3 * 3600).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        let params = CalculationParams::default();
        let format = FormatConfig::default();
        let feb_leap = monthly_timetable(mecca(), 2024, 2, ast(), &params, &format).unwrap();
        assert_eq!(feb_leap.len(), 29);
        let feb = monthly_timetable(mecca(), 2023, 2, ast(), &params, &format).unwrap();
        assert_eq!(feb.len(), 28);
        let dec = monthly_timetable(mecca(), 2024, 12, ast(), &params, &format).unwrap();
        assert_eq!(dec.len(), 31);
        assert_eq!(dec.last().unwrap().date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }

    #[test]
    fn test_rows_follow_their_date() {
        let rows = monthly_timetable(mecca(), 2024, 6, ast(), &CalculationParams::default(), &FormatConfig::default()).unwrap();
        for row in &rows {
            assert_eq!(row.times.evaluated_at.date_naive(), row.date);
        }
        // June days lengthen until the solstice.
        assert!(rows[19].times[Prayer::Maghrib].decimal_hour > rows[0].times[Prayer::Maghrib].decimal_hour);
    }

    #[test]
    fn test_invalid_month() {
        let result = monthly_timetable(mecca(), 2024, 13, ast(), &CalculationParams::default(), &FormatConfig::default());
        assert!(matches!(result, Err(MiqatError::InvalidDate(_))));
    }
}
