//! Functions for pulling capture-time and content-type values out of grouped exiftool JSON.

use crate::time::normalize_timestamp;
use crate::time::structs::RawTimestamp;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde_json::Value;

/// Embedded capture tags, most authoritative first.
const CAPTURE_TIME_SOURCES: [(&str, &str); 3] = [
    ("Time", "DateTimeOriginal"),
    ("Time", "CreateDate"),
    ("Time", "ModifyDate"),
];

/// Returns the first parseable embedded capture time, interpreted in `timezone`.
///
/// Tags that are missing, blank, or malformed are skipped; `None` means no usable
/// capture time exists, which is common and not an error.
pub fn get_capture_time(exif_info: &Value, timezone: Tz) -> Option<DateTime<Utc>> {
    CAPTURE_TIME_SOURCES.iter().find_map(|(group, field)| {
        get_string_field(exif_info, group, field)
            .and_then(|raw| normalize_timestamp(RawTimestamp::Embedded(raw), timezone))
    })
}

/// Returns the content-sniffed MIME type exiftool reported, if any.
pub fn get_sniffed_mime(exif_info: &Value) -> Option<&str> {
    get_string_field(exif_info, "Other", "MIMEType")
        .or_else(|| exif_info.get("MIMEType").and_then(Value::as_str))
}

/// Safely extracts a string field from nested JSON Value.
fn get_string_field<'a>(value: &'a Value, group: &str, field: &str) -> Option<&'a str> {
    value.get(group)?.get(field)?.as_str()
}
