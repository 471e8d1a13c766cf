//! Utility functions for parsing time strings and epoch values into chrono types.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses a naive datetime string as written in embedded metadata (YYYY:MM:DD HH:MM:SS[.fff]).
///
/// Cameras that never had their clock set often write a string of spaces (or zeros)
/// into these tags, both of which yield `None`.
pub fn parse_naive(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let formats = [
        "%Y:%m:%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y:%m:%d %H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];

    formats
        .into_iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Parses a remote timestamp string carrying an explicit UTC marker.
///
/// The photo service reports `creationTime` as RFC 3339 (`2021-06-01T10:00:00Z`,
/// optionally with fractional seconds). Any explicit offset is honored and the
/// result is converted to UTC.
pub fn parse_datetime_utc_z(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            DateTime::parse_from_str(s, "%Y:%m:%d %H:%M:%S%#z")
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
        .or_else(|| {
            s.strip_suffix('Z')
                .and_then(parse_naive)
                .map(|naive| naive.and_utc())
        })
}

/// Converts seconds since the Unix epoch into a UTC instant.
pub fn from_epoch_seconds(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_naive_exif_layout() {
        let dt = parse_naive("2021:06:01 10:00:00").unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2021, 6, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_parse_naive_rejects_blank_and_zeroed_values() {
        assert!(parse_naive("                    ").is_none());
        assert!(parse_naive("").is_none());
        assert!(parse_naive("0000:00:00 00:00:00").is_none());
    }

    #[test]
    fn test_parse_remote_variants() {
        let plain = parse_datetime_utc_z("2021-06-01T10:00:00Z").unwrap();
        let fractional = parse_datetime_utc_z("2021-06-01T10:00:00.000Z").unwrap();
        let exif_style = parse_datetime_utc_z("2021:06:01 10:00:00Z").unwrap();
        assert_eq!(plain, fractional);
        assert_eq!(plain, exif_style);
        assert_eq!(plain.to_rfc3339(), "2021-06-01T10:00:00+00:00");
    }

    #[test]
    fn test_parse_remote_with_offset_converts_to_utc() {
        let dt = parse_datetime_utc_z("2021-06-01T12:00:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2021-06-01T10:00:00+00:00");
    }

    #[test]
    fn test_parse_remote_garbage() {
        assert!(parse_datetime_utc_z("").is_none());
        assert!(parse_datetime_utc_z("yesterday").is_none());
    }

    #[test]
    fn test_epoch_seconds() {
        let dt = from_epoch_seconds(1_622_541_600).unwrap();
        assert_eq!(dt.to_rfc3339(), "2021-06-01T10:00:00+00:00");
    }
}
