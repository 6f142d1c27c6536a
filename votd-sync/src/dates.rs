//! UTC date helpers

use chrono::{Datelike, Duration, NaiveDate, Utc};

/// Current calendar date in UTC
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// `date` shifted by whole days; `None` only at the edges of chrono's range
pub fn offset_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(Duration::days(days))
}

/// English month name, e.g. "March"
pub fn month_name(date: NaiveDate) -> String {
    date.format("%B").to_string()
}

/// Zero-padded day of month, e.g. "05"
pub fn padded_day(date: NaiveDate) -> String {
    format!("{:02}", date.day())
}

/// Heading form, e.g. "March 05, 2025"
pub fn heading_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formats() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(month_name(date), "March");
        assert_eq!(padded_day(date), "05");
        assert_eq!(heading_date(date), "March 05, 2025");
    }

    #[test]
    fn test_offset_crosses_year() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(
            offset_days(date, -1),
            Some(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap())
        );
        assert_eq!(
            offset_days(date, 2),
            Some(NaiveDate::from_ymd_opt(2025, 1, 3).unwrap())
        );
    }
}
