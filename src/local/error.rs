use std::path::PathBuf;
use thiserror::Error;

/// Failure to describe a single local file. Never fatal to a batch.
#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("Could not stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} has no file name", .0.display())]
    NoFileName(PathBuf),

    #[error("{} is not a regular file", .0.display())]
    NotAFile(PathBuf),
}
