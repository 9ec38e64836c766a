use chrono::{Duration, NaiveDate};

/// Today's date in the browser's local timezone
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Parse a YYYY-MM-DD date string
pub fn parse_iso_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").ok()
}

/// e.g. "Wednesday, January 15, 2025"
pub fn format_grid_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

pub fn shift_days(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_add_signed(Duration::days(days)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_grid_date() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        assert_eq!(format_grid_date(date), "Wednesday, January 15, 2025");

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(format_grid_date(date), "Friday, March 1, 2024");
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(parse_iso_date("2025-06-03"), NaiveDate::from_ymd_opt(2025, 6, 3));
        assert_eq!(parse_iso_date(" 2025-06-03 "), NaiveDate::from_ymd_opt(2025, 6, 3));
        assert_eq!(parse_iso_date("2025-13-01"), None);
        assert_eq!(parse_iso_date("June 3"), None);
    }

    #[test]
    fn test_shift_days_crosses_month_and_year() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(shift_days(date, 1), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());

        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(shift_days(date, -1), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }
}
