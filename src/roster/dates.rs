//! Lenient parsing of the free-form date cells stored in the roster.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date-time layouts tried before the date-only ones.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Date-only layouts; these resolve to midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y%m%d",
    "%m/%d/%Y",
    "%d-%b-%Y",
    "%d %B %Y",
    "%B %d, %Y",
];

/// Parse a roster date cell.
///
/// Returns `None` for anything that is not recognisably a date; callers
/// treat that as "never due" rather than as an error.
pub fn parse_roster_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt);
        }
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_iso_date_is_midnight() {
        assert_eq!(parse_roster_date("2024-03-15"), Some(midnight(2024, 3, 15)));
        assert_eq!(parse_roster_date("  2024-03-15 "), Some(midnight(2024, 3, 15)));
    }

    #[test]
    fn test_alternate_separators() {
        assert_eq!(parse_roster_date("2024/03/15"), Some(midnight(2024, 3, 15)));
        assert_eq!(parse_roster_date("2024.03.15"), Some(midnight(2024, 3, 15)));
        assert_eq!(parse_roster_date("03/15/2024"), Some(midnight(2024, 3, 15)));
    }

    #[test]
    fn test_month_names() {
        assert_eq!(parse_roster_date("15 March 2024"), Some(midnight(2024, 3, 15)));
        assert_eq!(parse_roster_date("March 15, 2024"), Some(midnight(2024, 3, 15)));
        assert_eq!(parse_roster_date("15-Jan-2024"), Some(midnight(2024, 1, 15)));
    }

    #[test]
    fn test_compact_date() {
        assert_eq!(parse_roster_date("20240115"), Some(midnight(2024, 1, 15)));
        assert_eq!(parse_roster_date("20241315"), None);
    }

    #[test]
    fn test_datetime_keeps_time() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(13, 45, 0)
            .unwrap();
        assert_eq!(parse_roster_date("2024-03-15 13:45:00"), Some(expected));
        assert_eq!(parse_roster_date("2024-03-15T13:45"), Some(expected));
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(parse_roster_date(""), None);
        assert_eq!(parse_roster_date("not-a-date"), None);
        assert_eq!(parse_roster_date("2024-02-30"), None);
        assert_eq!(parse_roster_date("next tuesday"), None);
    }
}
