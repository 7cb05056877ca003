//! Parsing of the date strings carried by upstream records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::FeedError;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a record date into a UTC instant.
///
/// Accepts RFC 3339 (`2025-01-15T09:30:00.000Z`), an offset-less date-time
/// taken as UTC, or a bare `YYYY-MM-DD` taken as UTC midnight.
///
/// # Errors
/// Returns [`FeedError::InvalidDate`] when none of the formats match.
pub fn parse_instant(value: &str) -> Result<DateTime<Utc>, FeedError> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(FeedError::InvalidDate {
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parses_rfc3339_with_offset() {
        let parsed = parse_instant("2025-01-15T09:30:00+02:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 1, 15, 7, 30, 0).unwrap());
        assert!(parse_instant("2025-01-15T00:00:00.000Z").is_ok());
    }

    #[test]
    fn offsetless_values_are_utc() {
        assert_eq!(
            parse_instant("2025-01-15T09:30:00").unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap()
        );
        assert_eq!(
            parse_instant(" 2025-01-15 ").unwrap(),
            Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn rejects_garbage() {
        let err = parse_instant("next tuesday").unwrap_err();
        assert_eq!(
            err,
            FeedError::InvalidDate {
                value: "next tuesday".into()
            }
        );
        assert!(parse_instant("2025-02-30").is_err());
    }
}
