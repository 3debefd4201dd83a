//! Timezone-naive date and week arithmetic.
//!
//! All week math here is Monday-anchored, independent of whatever
//! week-start convention a frontend uses for display. There is no
//! time-of-day component anywhere in this module, so DST never applies.

use chrono::{Datelike, Duration, NaiveDate};

use crate::error::{ScheduleError, ScheduleResult};

/// The Monday on or before `date`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_monday() as i64;
    date - Duration::days(back)
}

/// Monday through Sunday of the week starting at `week_start`.
///
/// `week_start` is expected to be a Monday (the `Schedule` invariant);
/// the function simply counts seven days from whatever it is given.
pub fn week_days(week_start: NaiveDate) -> Vec<NaiveDate> {
    (0..7).map(|d| week_start + Duration::days(d)).collect()
}

/// Format a date as `YYYY-MM-DD`.
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` string.
pub fn parse_iso_date(s: &str) -> ScheduleResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| ScheduleError::InvalidDate(s.to_string()))
}

pub fn is_same_date(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

/// One cell of the six-week month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayInfo {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
}

/// Six full Monday-start weeks (42 cells) covering the month of `anchor`,
/// including leading and trailing days from the adjacent months.
///
/// `today` only affects the `is_today` flags; the cell set is a pure
/// function of `anchor`.
pub fn month_grid(anchor: NaiveDate, today: NaiveDate) -> Vec<DayInfo> {
    let first = anchor.with_day(1).unwrap();
    let start = monday_of(first);

    (0..42)
        .map(|i| {
            let date = start + Duration::days(i);
            DayInfo {
                date,
                is_current_month: date.month() == anchor.month() && date.year() == anchor.year(),
                is_today: date == today,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_iso_date(s).unwrap()
    }

    #[test]
    fn test_monday_of_midweek() {
        // 2025-01-08 is a Wednesday
        assert_eq!(monday_of(date("2025-01-08")), date("2025-01-06"));
    }

    #[test]
    fn test_monday_of_is_idempotent_on_mondays() {
        assert_eq!(monday_of(date("2025-01-06")), date("2025-01-06"));
    }

    #[test]
    fn test_monday_of_sunday_goes_back_six_days() {
        assert_eq!(monday_of(date("2025-01-12")), date("2025-01-06"));
    }

    #[test]
    fn test_week_days_spans_monday_to_sunday() {
        let monday = monday_of(date("2025-01-08"));
        let days = week_days(monday);

        assert_eq!(days.len(), 7);
        assert_eq!(days[0], monday);
        assert_eq!(days[6], date("2025-01-12"));
    }

    #[test]
    fn test_iso_roundtrip() {
        assert_eq!(to_iso_date(date("2025-03-01")), "2025-03-01");
        assert!(parse_iso_date("not-a-date").is_err());
        assert!(parse_iso_date("2025-02-30").is_err());
    }

    #[test]
    fn test_month_grid_always_42_cells() {
        // February in a non-leap year, a 31-day month, and a leap February
        for anchor in ["2025-02-15", "2025-01-31", "2024-02-29"] {
            let grid = month_grid(date(anchor), date("2025-06-01"));
            assert_eq!(grid.len(), 42, "anchor {}", anchor);
        }
    }

    #[test]
    fn test_month_grid_starts_on_monday_and_covers_month() {
        let grid = month_grid(date("2025-01-15"), date("2025-01-15"));

        // January 2025 starts on a Wednesday, so the grid leads with
        // Dec 30 and Dec 31 from the previous month.
        assert_eq!(grid[0].date, date("2024-12-30"));
        assert!(!grid[0].is_current_month);
        assert!(grid.iter().any(|d| d.date == date("2025-01-01")));
        assert!(grid.iter().any(|d| d.date == date("2025-01-31")));

        let in_month = grid.iter().filter(|d| d.is_current_month).count();
        assert_eq!(in_month, 31);
    }

    #[test]
    fn test_month_grid_today_only_moves_the_flag() {
        let a = month_grid(date("2025-01-15"), date("2025-01-15"));
        let b = month_grid(date("2025-01-15"), date("2025-06-01"));

        let dates_a: Vec<_> = a.iter().map(|d| d.date).collect();
        let dates_b: Vec<_> = b.iter().map(|d| d.date).collect();
        assert_eq!(dates_a, dates_b);

        assert_eq!(a.iter().filter(|d| d.is_today).count(), 1);
        assert_eq!(b.iter().filter(|d| d.is_today).count(), 0);
    }
}
