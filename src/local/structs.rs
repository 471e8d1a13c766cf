use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// MIME string used when neither the suffix nor the file contents classify a file.
pub const UNKNOWN_MIME: &str = "unknown";

/// Identity-relevant attributes of one local media file, captured at a single moment.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocalMediaDescriptor {
    pub path: PathBuf,
    /// Base name of `path`; the join key against remote items.
    pub filename: String,
    /// Lowercase MIME type after remote-service remaps, or [`UNKNOWN_MIME`].
    pub mime_type: String,
    /// Capture time from embedded metadata, resolved with the timezone hypothesis.
    pub capture_time: Option<DateTime<Utc>>,
    pub fs_access_time: DateTime<Utc>,
    pub fs_change_time: DateTime<Utc>,
    pub fs_modify_time: DateTime<Utc>,
}
