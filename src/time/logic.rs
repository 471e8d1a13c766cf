//! Normalization of heterogeneous timestamps into comparable UTC instants.

use super::error::TimeError;
use super::parsing::{from_epoch_seconds, parse_datetime_utc_z, parse_naive};
use super::structs::{RawTimestamp, TimestampFormat};
use chrono::{DateTime, LocalResult, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use std::time::SystemTime;

/// Resolves an operator-supplied zone name (e.g. `America/New_York`) into a timezone.
pub fn parse_timezone(name: &str) -> Result<Tz, TimeError> {
    Tz::from_str(name.trim()).map_err(|_| TimeError::InvalidTimezone(name.to_string()))
}

/// Normalizes a raw string of the given format into a UTC instant.
///
/// `timezone` is only consulted for [`TimestampFormat::Embedded`] values, which carry no
/// zone of their own. Empty or unparsable input yields `None`.
pub fn normalize(raw: &str, format: TimestampFormat, timezone: Tz) -> Option<DateTime<Utc>> {
    match format {
        TimestampFormat::Remote => normalize_timestamp(RawTimestamp::Remote(raw), timezone),
        TimestampFormat::Embedded => normalize_timestamp(RawTimestamp::Embedded(raw), timezone),
        TimestampFormat::EpochSeconds => raw
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|secs| normalize_timestamp(RawTimestamp::EpochSeconds(secs), timezone)),
    }
}

/// Normalizes an already-classified timestamp into a UTC instant.
pub fn normalize_timestamp(raw: RawTimestamp<'_>, timezone: Tz) -> Option<DateTime<Utc>> {
    match raw {
        RawTimestamp::Remote(s) => parse_datetime_utc_z(s),
        RawTimestamp::Embedded(s) => {
            let naive = parse_naive(s)?;
            // A wall-clock time that falls in a DST gap has no instant; a repeated
            // one resolves to its earlier occurrence.
            match timezone.from_local_datetime(&naive) {
                LocalResult::Single(zoned) | LocalResult::Ambiguous(zoned, _) => {
                    Some(zoned.with_timezone(&Utc))
                }
                LocalResult::None => None,
            }
        }
        RawTimestamp::EpochSeconds(secs) => from_epoch_seconds(secs),
    }
}

/// Converts a filesystem time into a UTC instant, truncated to whole seconds like a stat record.
pub fn from_system_time(time: SystemTime) -> DateTime<Utc> {
    let dt: DateTime<Utc> = time.into();
    from_epoch_seconds(dt.timestamp()).unwrap_or(dt)
}
