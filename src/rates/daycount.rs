//! Day count conventions for simple interest between calendar dates
//!
//! - 30/360 (ordinary simple interest): every month has 30 days
//! - Actual/360 (Banker's rule): actual days over a 360-day year

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day count convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayCount {
    /// 30/360, ordinary simple interest
    Thirty360,
    /// Actual/360, Banker's rule
    Actual360,
}

impl DayCount {
    /// Number of days between two dates under this convention
    pub fn days(&self, start: NaiveDate, end: NaiveDate) -> i64 {
        match self {
            DayCount::Thirty360 => {
                let years = (end.year() - start.year()) as i64;
                let months = end.month() as i64 - start.month() as i64;
                let days = end.day() as i64 - start.day() as i64;
                360 * years + 30 * months + days
            }
            DayCount::Actual360 => (end - start).num_days(),
        }
    }

    /// Fraction of a 360-day year between two dates
    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        self.days(start, end) as f64 / 360.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_thirty_360() {
        let start = date(2019, 3, 15);
        let end = date(2019, 10, 1);
        // 30 * 7 - 14 = 196
        assert_eq!(DayCount::Thirty360.days(start, end), 196);
        assert!((DayCount::Thirty360.year_fraction(start, end) - 196.0 / 360.0).abs() < 1e-12);
    }

    #[test]
    fn test_actual_360() {
        let start = date(2019, 3, 15);
        let end = date(2019, 10, 1);
        assert_eq!(DayCount::Actual360.days(start, end), 200);
        assert!((DayCount::Actual360.year_fraction(start, end) - 200.0 / 360.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_year_conventions_differ() {
        let start = date(2021, 1, 1);
        let end = date(2022, 1, 1);
        assert_eq!(DayCount::Thirty360.days(start, end), 360);
        assert_eq!(DayCount::Actual360.days(start, end), 365);
    }
}
