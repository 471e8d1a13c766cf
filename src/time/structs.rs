use serde::{Deserialize, Serialize};

/// IANA name of the zone assumed for naive capture timestamps when the operator supplies none.
pub const DEFAULT_TIMEZONE_HYPOTHESIS: &str = "Europe/London";

/// A timestamp in one of the shapes the reconciler encounters, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTimestamp<'a> {
    /// RFC 3339 string with a UTC marker, as reported by the remote service.
    Remote(&'a str),
    /// Zone-less `YYYY:MM:DD HH:MM:SS` string from embedded metadata.
    Embedded(&'a str),
    /// Seconds since the Unix epoch, as found in a stat record.
    EpochSeconds(i64),
}

/// Which shape a raw string is expected to be in.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimestampFormat {
    Remote,
    Embedded,
    EpochSeconds,
}
