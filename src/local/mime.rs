//! MIME detection for local files, normalized to what the remote service reports.

use super::structs::UNKNOWN_MIME;
use std::ffi::OsStr;
use std::path::Path;

const REMOTE_MP4: &str = "video/mp4";

/// Container types the photo service re-labels as MP4 after upload.
const REMOTE_MP4_MIME_ALIASES: [&str; 2] = ["video/webm", "video/x-matroska"];

/// Extensions that end up as MP4 remotely even when nothing could classify them locally.
const REMOTE_MP4_EXTENSIONS: [&str; 4] = ["mkv", "webm", "mts", "m2ts"];

/// Detects the comparison MIME type of a local file.
///
/// The filename suffix is consulted first; `sniffed` (the type reported by reading the
/// file contents) is only used when the suffix does not classify.
pub fn detect_mime(path: &Path, sniffed: Option<&str>) -> String {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_lowercase);

    let detected = mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_lowercase())
        .or_else(|| {
            sniffed
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
        });

    normalize_mime(detected.as_deref(), extension.as_deref())
}

/// Applies the remote-service remaps to a detected MIME type.
///
/// An alias extension wins over whatever type was detected for it, since suffix
/// databases classify e.g. `.mts` as `model/vnd.mts`. `extension` must be lowercase.
/// This only affects comparison; the file's real type is untouched.
pub fn normalize_mime(detected: Option<&str>, extension: Option<&str>) -> String {
    if extension.is_some_and(|ext| REMOTE_MP4_EXTENSIONS.contains(&ext)) {
        return REMOTE_MP4.to_string();
    }
    match detected {
        Some(mime) if REMOTE_MP4_MIME_ALIASES.contains(&mime) => REMOTE_MP4.to_string(),
        Some(mime) => mime.to_string(),
        None => UNKNOWN_MIME.to_string(),
    }
}
