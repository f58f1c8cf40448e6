use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::error::FeedError;

const DISPLAY_FORMAT: &str = "%d/%m/%Y";

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Formats a feed timestamp as `dd/mm/yyyy`, or returns an empty string when
/// the value cannot be parsed.
pub fn format_published_date(value: &str) -> String {
    parse_published_date(value)
        .map(|date| date.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}

/// Calendar date of a timestamp, taken in the timestamp's own offset.
pub fn parse_published_date(value: &str) -> Result<NaiveDate, FeedError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Ok(dt.date_naive());
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(dt.date());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| FeedError::DateParse(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_published_date() {
        assert_eq!(format_published_date("2024-03-05T10:00:00Z"), "05/03/2024");
        assert_eq!(format_published_date("2023-12-31T23:59:59+00:00"), "31/12/2023");
        assert_eq!(format_published_date("  2024-03-05T10:00:00Z  "), "05/03/2024");
    }

    #[test]
    fn test_format_uses_timestamp_offset() {
        assert_eq!(format_published_date("2024-03-05T23:30:00-05:00"), "05/03/2024");
        assert_eq!(format_published_date("2024-03-06T00:30:00+02:00"), "06/03/2024");
    }

    #[test]
    fn test_format_other_layouts() {
        assert_eq!(format_published_date("Tue, 05 Mar 2024 10:00:00 GMT"), "05/03/2024");
        assert_eq!(format_published_date("2024-03-05T10:00:00"), "05/03/2024");
        assert_eq!(format_published_date("2024-03-05 10:00:00.250"), "05/03/2024");
        assert_eq!(format_published_date("2024-03-05"), "05/03/2024");
    }

    #[test]
    fn test_format_invalid_is_empty() {
        assert_eq!(format_published_date(""), "");
        assert_eq!(format_published_date("   "), "");
        assert_eq!(format_published_date("yesterday-ish"), "");
        assert_eq!(format_published_date("2024-13-45T10:00:00Z"), "");
        assert_eq!(format_published_date(&format_published_date("garbage")), "");
    }

    #[test]
    fn test_parse_error_carries_value() {
        match parse_published_date("nope") {
            Err(FeedError::DateParse(value)) => assert_eq!(value, "nope"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
