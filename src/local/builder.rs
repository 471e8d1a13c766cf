use super::capture::{get_capture_time, get_sniffed_mime};
use super::error::DescriptorError;
use super::mime::detect_mime;
use super::structs::LocalMediaDescriptor;
use crate::time::from_system_time;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use exiftool::{ExifTool, ExifToolError};
use serde_json::Value;
use std::fs::{self, Metadata};
use std::path::Path;
use tracing::{debug, warn};

/// Builds [`LocalMediaDescriptor`]s from paths.
///
/// Holds a running `exiftool` process, so create one and reuse it for a whole batch.
pub struct LocalDescriptorBuilder {
    exiftool: ExifTool,
    timezone: Tz,
}

impl LocalDescriptorBuilder {
    /// Starts `exiftool` from the system `PATH`.
    ///
    /// `timezone` is the hypothesis applied to zone-less embedded capture times.
    pub fn new(timezone: Tz) -> Result<Self, ExifToolError> {
        Ok(Self {
            exiftool: ExifTool::new()?,
            timezone,
        })
    }

    /// Starts a specific `exiftool` executable.
    pub fn with_executable(exiftool_path: &Path, timezone: Tz) -> Result<Self, ExifToolError> {
        Ok(Self {
            exiftool: ExifTool::with_executable(exiftool_path)?,
            timezone,
        })
    }

    /// Describes the file at `path`.
    ///
    /// # Errors
    ///
    /// Fails only when the path cannot be stat'd or is not a regular file. Unreadable or
    /// missing embedded metadata leaves `capture_time` empty instead.
    pub fn build(&mut self, path: &Path) -> Result<LocalMediaDescriptor, DescriptorError> {
        let metadata = fs::metadata(path).map_err(|source| DescriptorError::Stat {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(DescriptorError::NotAFile(path.to_path_buf()));
        }

        let exif_info = match self.exiftool.json(path, &["-g2"]) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not read embedded metadata");
                Value::Null
            }
        };

        describe(path, &metadata, &exif_info, self.timezone)
    }
}

/// Assembles a descriptor from one stat snapshot and the file's exiftool output.
pub fn describe(
    path: &Path,
    metadata: &Metadata,
    exif_info: &Value,
    timezone: Tz,
) -> Result<LocalMediaDescriptor, DescriptorError> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| DescriptorError::NoFileName(path.to_path_buf()))?;

    let mime_type = detect_mime(path, get_sniffed_mime(exif_info));

    // Only still images carry zone-less capture tags the remote service reads back
    // verbatim; video container dates are written in UTC and are left to the fallback.
    let capture_time = if mime_type.starts_with("image/") {
        get_capture_time(exif_info, timezone)
    } else {
        None
    };

    let fs_modify_time = metadata
        .modified()
        .map(from_system_time)
        .map_err(|source| DescriptorError::Stat {
            path: path.to_path_buf(),
            source,
        })?;
    let fs_access_time = metadata
        .accessed()
        .map(from_system_time)
        .unwrap_or(fs_modify_time);
    let fs_change_time = change_time(metadata).unwrap_or(fs_modify_time);

    debug!(
        filename = %filename,
        mime_type = %mime_type,
        capture_time = ?capture_time,
        fs_access_time = %fs_access_time,
        "Described local file"
    );

    Ok(LocalMediaDescriptor {
        path: path.to_path_buf(),
        filename,
        mime_type,
        capture_time,
        fs_access_time,
        fs_change_time,
        fs_modify_time,
    })
}

#[cfg(unix)]
fn change_time(metadata: &Metadata) -> Option<DateTime<Utc>> {
    use crate::time::normalize_timestamp;
    use crate::time::structs::RawTimestamp;
    use std::os::unix::fs::MetadataExt;

    normalize_timestamp(RawTimestamp::EpochSeconds(metadata.ctime()), Tz::UTC)
}

#[cfg(not(unix))]
fn change_time(metadata: &Metadata) -> Option<DateTime<Utc>> {
    metadata.created().ok().map(from_system_time)
}
