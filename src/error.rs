use thiserror::Error;

/// The primary error type for the media-reconciler crate.
///
/// Only conditions that make the whole batch meaningless surface here. A file that cannot
/// be described is reported per file instead.
#[derive(Error, Debug)]
pub enum ReconcileError {
    #[error("Exiftool failed to start")]
    Exiftool(#[from] exiftool::ExifToolError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Time(#[from] crate::time::error::TimeError),

    /// The album could not be listed, so it is unknown which files exist in it.
    #[error("Album index unavailable: {0}")]
    Index(#[from] crate::remote::error::IndexError),

    #[error("No album titled \"{0}\"")]
    AlbumNotFound(String),

    #[error("{count} albums are titled \"{title}\"")]
    AmbiguousAlbum { title: String, count: usize },
}
