//! Query time parsing shared by the server and the CLI.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

/// Parse a query time.
///
/// Accepts RFC 3339 (`2022-11-12T13:14:15Z`), a naive ISO timestamp
/// (`2022-11-12T13:14:15`, read as UTC), or a bare date (`2022-11-12`,
/// midnight UTC). Surrounding whitespace is ignored.
pub fn parse_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Ok(time) = DateTime::parse_from_rfc3339(raw) {
        return Some(time.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_formats() {
        let expected = Utc.with_ymd_and_hms(2022, 11, 12, 13, 14, 15).unwrap();

        assert_eq!(parse_time("2022-11-12T13:14:15Z"), Some(expected));
        assert_eq!(parse_time("2022-11-12T13:14:15+00:00"), Some(expected));
        assert_eq!(parse_time("2022-11-12T13:14:15"), Some(expected));
        assert_eq!(parse_time(" 2022-11-12T13:14:15 "), Some(expected));
        assert_eq!(
            parse_time("2022-11-12"),
            Some(Utc.with_ymd_and_hms(2022, 11, 12, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_time_fractional_seconds() {
        let time = parse_time("2022-11-12T13:14:15.250").unwrap();
        assert_eq!(time.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_time_offset_is_normalized() {
        assert_eq!(
            parse_time("2022-11-12T15:14:15+02:00"),
            Some(Utc.with_ymd_and_hms(2022, 11, 12, 13, 14, 15).unwrap())
        );
    }

    #[test]
    fn test_parse_time_rejects_garbage() {
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("yesterday"), None);
        assert_eq!(parse_time("2022-13-12T00:00:00"), None);
    }
}
