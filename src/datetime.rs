//! Date/time utilities for clubboard.
//!
//! Timestamps are stored by SQLite as UTC `YYYY-MM-DD HH:MM:SS` strings and
//! shifted into the display timezone only when a page is rendered.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Format used on every rendered page.
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a datetime string (stored as UTC) to the specified timezone.
///
/// Accepts RFC3339 or the SQLite `datetime('now')` format. Returns the
/// original string unchanged if either the timezone or the datetime cannot
/// be parsed.
pub fn format_datetime(datetime_str: &str, timezone: &str, format: &str) -> String {
    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return datetime_str.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        return dt.with_timezone(&Utc).with_timezone(&tz).format(format).to_string();
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S") {
        return naive.and_utc().with_timezone(&tz).format(format).to_string();
    }

    datetime_str.to_string()
}

/// Format a stored timestamp for display in the given timezone.
pub fn to_display(datetime_str: &str, timezone: &str) -> String {
    format_datetime(datetime_str, timezone, DISPLAY_FORMAT)
}

/// Check that a timezone name is known to the tz database.
pub fn is_valid_timezone(timezone: &str) -> bool {
    timezone.parse::<Tz>().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime_sqlite_shifts_nine_hours() {
        let result = to_display("2024-01-15 10:30:00", "Asia/Tokyo");
        assert_eq!(result, "2024-01-15 19:30:00");
    }

    #[test]
    fn test_format_datetime_crosses_midnight() {
        let result = to_display("2024-12-31 20:00:05", "Asia/Tokyo");
        assert_eq!(result, "2025-01-01 05:00:05");
    }

    #[test]
    fn test_format_datetime_rfc3339() {
        let result = format_datetime("2024-01-15T10:30:00+00:00", "Asia/Tokyo", "%Y/%m/%d %H:%M");
        assert_eq!(result, "2024/01/15 19:30");
    }

    #[test]
    fn test_format_datetime_utc() {
        assert_eq!(to_display("2024-01-15 10:30:00", "UTC"), "2024-01-15 10:30:00");
    }

    #[test]
    fn test_format_datetime_invalid_inputs() {
        assert_eq!(
            to_display("2024-01-15 10:30:00", "Invalid/Zone"),
            "2024-01-15 10:30:00"
        );
        assert_eq!(to_display("not a date", "Asia/Tokyo"), "not a date");
    }

    #[test]
    fn test_is_valid_timezone() {
        assert!(is_valid_timezone("Asia/Tokyo"));
        assert!(is_valid_timezone("UTC"));
        assert!(!is_valid_timezone("Mars/Olympus"));
    }
}
