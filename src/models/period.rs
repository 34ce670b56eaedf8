//! Period windows for aggregation
//!
//! A window is a half-open calendar interval [start, end) derived from a
//! reference date and a period kind. Weekly windows start on Monday,
//! monthly windows on the 1st.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of period used to bucket records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Weekly,
    Monthly,
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "weekly"),
            Self::Monthly => write!(f, "monthly"),
        }
    }
}

/// A half-open time interval [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodWindow {
    /// First day inside the window
    pub start: NaiveDate,
    /// First day after the window
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// Get the window of the given kind containing the reference date
    pub fn containing(kind: PeriodKind, reference: NaiveDate) -> Self {
        match kind {
            PeriodKind::Weekly => {
                let days_from_monday = reference.weekday().num_days_from_monday() as i64;
                let start = reference - Duration::days(days_from_monday);
                Self {
                    start,
                    end: start + Duration::days(7),
                }
            }
            PeriodKind::Monthly => {
                let start = reference.with_day(1).unwrap_or(reference);
                let end = if start.month() == 12 {
                    NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
                } else {
                    NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
                }
                .unwrap_or(start);
                Self { start, end }
            }
        }
    }

    /// Get the immediately preceding window of the same kind
    pub fn prev(&self, kind: PeriodKind) -> Self {
        Self::containing(kind, self.start - Duration::days(1))
    }

    /// Check if a date falls within this window
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }

    /// Number of days the window spans
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Days elapsed inside the window as of the reference date
    ///
    /// Counts the reference day itself, clamped to [1, len_days] so that
    /// early-period daily averages are not inflated and no caller ever
    /// divides by zero.
    pub fn elapsed_days(&self, reference: NaiveDate) -> i64 {
        let since_start = (reference - self.start).num_days() + 1;
        since_start.clamp(1, self.len_days())
    }
}

impl fmt::Display for PeriodWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // End shown inclusive for readability
        let last = self.end - Duration::days(1);
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            last.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekly_window_starts_monday() {
        // 2025-03-12 is a Wednesday
        let window = PeriodWindow::containing(PeriodKind::Weekly, day(2025, 3, 12));
        assert_eq!(window.start, day(2025, 3, 10));
        assert_eq!(window.end, day(2025, 3, 17));
        assert_eq!(window.start.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_weekly_window_on_monday() {
        let window = PeriodWindow::containing(PeriodKind::Weekly, day(2025, 3, 10));
        assert_eq!(window.start, day(2025, 3, 10));
    }

    #[test]
    fn test_monthly_window() {
        let window = PeriodWindow::containing(PeriodKind::Monthly, day(2025, 1, 15));
        assert_eq!(window.start, day(2025, 1, 1));
        assert_eq!(window.end, day(2025, 2, 1));
        assert_eq!(window.len_days(), 31);
    }

    #[test]
    fn test_monthly_window_december() {
        let window = PeriodWindow::containing(PeriodKind::Monthly, day(2024, 12, 25));
        assert_eq!(window.start, day(2024, 12, 1));
        assert_eq!(window.end, day(2025, 1, 1));
    }

    #[test]
    fn test_half_open_contains() {
        let window = PeriodWindow::containing(PeriodKind::Monthly, day(2025, 1, 15));
        assert!(window.contains(day(2025, 1, 1)));
        assert!(window.contains(day(2025, 1, 31)));
        assert!(!window.contains(day(2025, 2, 1)));
        assert!(!window.contains(day(2024, 12, 31)));
    }

    #[test]
    fn test_prev_monthly() {
        let jan = PeriodWindow::containing(PeriodKind::Monthly, day(2025, 1, 15));
        let dec = jan.prev(PeriodKind::Monthly);
        assert_eq!(dec.start, day(2024, 12, 1));
        assert_eq!(dec.end, day(2025, 1, 1));
    }

    #[test]
    fn test_prev_weekly() {
        let this_week = PeriodWindow::containing(PeriodKind::Weekly, day(2025, 3, 12));
        let last_week = this_week.prev(PeriodKind::Weekly);
        assert_eq!(last_week.start, day(2025, 3, 3));
        assert_eq!(last_week.end, day(2025, 3, 10));
    }

    #[test]
    fn test_elapsed_days_counts_reference_day() {
        let window = PeriodWindow::containing(PeriodKind::Monthly, day(2025, 1, 1));
        assert_eq!(window.elapsed_days(day(2025, 1, 1)), 1);
        assert_eq!(window.elapsed_days(day(2025, 1, 10)), 10);
    }

    #[test]
    fn test_elapsed_days_clamped_to_window_length() {
        let window = PeriodWindow::containing(PeriodKind::Weekly, day(2025, 3, 10));
        // Reference beyond the window never exceeds its length
        assert_eq!(window.elapsed_days(day(2025, 4, 1)), 7);
        // Reference before the window floors at one day
        assert_eq!(window.elapsed_days(day(2025, 1, 1)), 1);
    }

    #[test]
    fn test_february_leap_year() {
        let window = PeriodWindow::containing(PeriodKind::Monthly, day(2024, 2, 10));
        assert_eq!(window.len_days(), 29);

        let window = PeriodWindow::containing(PeriodKind::Monthly, day(2025, 2, 10));
        assert_eq!(window.len_days(), 28);
    }

    #[test]
    fn test_display() {
        let window = PeriodWindow::containing(PeriodKind::Monthly, day(2025, 1, 15));
        assert_eq!(format!("{}", window), "2025-01-01 to 2025-01-31");
        assert_eq!(format!("{}", PeriodKind::Weekly), "weekly");
    }

    #[test]
    fn test_serialization() {
        let window = PeriodWindow::containing(PeriodKind::Weekly, day(2025, 3, 12));
        let json = serde_json::to_string(&window).unwrap();
        let deserialized: PeriodWindow = serde_json::from_str(&json).unwrap();
        assert_eq!(window, deserialized);
    }
}
