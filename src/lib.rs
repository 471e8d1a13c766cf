//! # Media Reconciler
//!
//! Decide which local photos and videos already exist in a remote photo album.
//!
//! Each local file is reduced to a descriptor (filename, MIME type, embedded capture time,
//! filesystem timestamps) and compared against a fully paginated index of the album.
//! A file is considered present only when its filename and MIME type match and its
//! capture time equals the remote creation time, or, for files without a capture time,
//! when its access time falls inside a configurable tolerance window.
//!
//! ## Key Features
//!
//! - **Timestamp normalization**: Embedded capture times without a zone are resolved with an operator-supplied timezone hypothesis.
//! - **MIME remapping**: Local MIME types are adjusted for the container conversions the remote service performs.
//! - **Album index**: Albums and album contents are listed as lazy, paginated streams.
//! - **Diagnostic trail**: Every verdict records the stages it passed through.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use media_reconciler::{ReconcileConfig, Reconciler, ReqwestHttpClient};
//!
//! #[tokio::main]
//! async fn main() -> color_eyre::Result<()> {
//!     let config = ReconcileConfig::builder()
//!         .album_title("Summer 2021")
//!         .tolerance_minutes(10)
//!         .build();
//!
//!     let mut reconciler = Reconciler::builder()
//!         .config(config)
//!         .http_client(Arc::new(ReqwestHttpClient::new()?))
//!         .access_token(std::env::var("PHOTOS_ACCESS_TOKEN")?)
//!         .build()?;
//!
//!     let report = reconciler.run(&[PathBuf::from("IMG_0001.jpg")]).await?;
//!     for path in report.files_to_upload() {
//!         println!("upload {}", path.display());
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod local;
pub mod matching;
pub mod reconciler;
pub mod remote;
pub mod structs;
pub mod time;
pub mod utils;

pub use config::ReconcileConfig;
pub use error::ReconcileError;
pub use local::structs::LocalMediaDescriptor;
pub use matching::decide;
pub use matching::structs::{MatchVerdict, StageOutcome};
pub use reconciler::{Reconciler, reconcile};
pub use remote::structs::{Album, RemoteAlbumIndex, RemoteMediaDescriptor};
pub use remote::{HttpClient, PhotosLibraryClient, ReqwestHttpClient};
pub use structs::{FileOutcome, ReconcileReport, UploadAction};
