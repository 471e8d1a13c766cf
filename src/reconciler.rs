use crate::ReconcileError;
use crate::config::ReconcileConfig;
use crate::local::LocalDescriptorBuilder;
use crate::local::error::DescriptorError;
use crate::local::structs::LocalMediaDescriptor;
use crate::matching::decide;
use crate::matching::structs::MatchVerdict;
use crate::remote::structs::{Album, RemoteAlbumIndex};
use crate::remote::{HttpClient, PhotosLibraryClient};
use crate::structs::{FileOutcome, FileReport, ReconcileReport};
use bon::bon;
use chrono_tz::Tz;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Decides, for a batch of local files, which ones still need uploading to an album.
///
/// Create it once and reuse it across batches; it keeps an `exiftool` process running.
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use std::path::PathBuf;
/// # use media_reconciler::{ReconcileConfig, ReconcileError, Reconciler, ReqwestHttpClient};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ReconcileError> {
/// let mut reconciler = Reconciler::builder()
///     .config(ReconcileConfig::builder().album_title("Summer 2021").build())
///     .http_client(Arc::new(ReqwestHttpClient::new()?))
///     .access_token("ya29...")
///     .build()?;
/// let report = reconciler.run(&[PathBuf::from("IMG_0001.jpg")]).await?;
/// println!("{} to upload", report.to_upload());
/// # Ok(())
/// # }
/// ```
pub struct Reconciler {
    config: ReconcileConfig,
    timezone: Tz,
    exiftool_path: Option<PathBuf>,
    /// Started on the first file that needs describing.
    descriptors: Option<LocalDescriptorBuilder>,
    photos: PhotosLibraryClient,
}

#[bon]
impl Reconciler {
    /// Constructs a `Reconciler`.
    ///
    /// # Builder Arguments
    ///
    /// * `config: ReconcileConfig` - Album title, tolerance and timezone hypothesis.
    /// * `http_client: Arc<dyn HttpClient>` - Transport for the photo library API.
    /// * `access_token: String` - OAuth 2.0 bearer token, already obtained.
    /// * `exiftool_path: Option<PathBuf>` - A specific `exiftool` executable. If `None`, it is searched for in `PATH`. It is only started once a file has to be described.
    /// * `base_url: Option<String>` - Overrides the API base URL.
    ///
    /// # Errors
    ///
    /// [`ReconcileError::Time`] if the timezone hypothesis is not a valid zone.
    #[builder]
    pub fn new(
        config: ReconcileConfig,
        http_client: Arc<dyn HttpClient>,
        #[builder(into)] access_token: String,
        exiftool_path: Option<PathBuf>,
        #[builder(into)] base_url: Option<String>,
    ) -> Result<Self, ReconcileError> {
        let timezone = config.timezone()?;
        let mut photos =
            PhotosLibraryClient::new(http_client, access_token).with_page_size(config.page_size);
        if let Some(base_url) = base_url {
            photos = photos.with_base_url(base_url);
        }

        Ok(Self {
            config,
            timezone,
            exiftool_path,
            descriptors: None,
            photos,
        })
    }

    pub fn config(&self) -> &ReconcileConfig {
        &self.config
    }

    pub fn photos(&self) -> &PhotosLibraryClient {
        &self.photos
    }

    /// Looks up the configured album and paginates it to completion.
    ///
    /// An album that does not exist yet is an empty index without an album, so every
    /// file is reported as absent.
    pub async fn fetch_index(&self) -> Result<RemoteAlbumIndex, ReconcileError> {
        let album = resolve_album(
            &self.photos,
            &self.config.album_title,
            self.config.app_created_only,
            self.config.strict_album_lookup,
        )
        .await?;
        match album {
            Some(album) => Ok(self.photos.album_index(&album).await?),
            None => {
                warn!(title = %self.config.album_title, "Album does not exist, nothing is uploaded yet");
                Ok(RemoteAlbumIndex::from_items(Vec::new()))
            }
        }
    }

    fn descriptor_builder(&mut self) -> Result<&mut LocalDescriptorBuilder, ReconcileError> {
        let builder = match self.descriptors.take() {
            Some(builder) => builder,
            None => match &self.exiftool_path {
                Some(path) => LocalDescriptorBuilder::with_executable(path, self.timezone)?,
                None => LocalDescriptorBuilder::new(self.timezone)?,
            },
        };
        Ok(self.descriptors.insert(builder))
    }

    /// Describes every path, keeping per-file failures alongside the successes.
    ///
    /// # Errors
    ///
    /// [`ReconcileError::Exiftool`] if `exiftool` cannot be started. An empty batch never
    /// starts it.
    pub fn describe_all(
        &mut self,
        paths: &[PathBuf],
    ) -> Result<Vec<(PathBuf, Result<LocalMediaDescriptor, DescriptorError>)>, ReconcileError> {
        let paths: Vec<PathBuf> = unique_paths(paths).collect();
        if paths.is_empty() {
            return Ok(Vec::new());
        }

        let descriptors = self.descriptor_builder()?;
        Ok(paths
            .into_iter()
            .map(|path| {
                let descriptor = descriptors.build(&path);
                (path, descriptor)
            })
            .collect())
    }

    /// Reconciles a batch of files against the configured album.
    ///
    /// The album is fully indexed before any file is compared. Files that cannot be
    /// described are reported as [`FileOutcome::Failed`] without affecting the rest.
    ///
    /// # Errors
    ///
    /// Fails if the album cannot be listed, if a strict lookup does not find exactly one
    /// album, or if `exiftool` cannot be started. No partial report is produced then.
    #[instrument(skip(self, paths), fields(album = %self.config.album_title, files = paths.len()))]
    pub async fn run(&mut self, paths: &[PathBuf]) -> Result<ReconcileReport, ReconcileError> {
        if self.config.skip_compare {
            info!("Skipping comparison, every file is marked for upload");
            let files = unique_paths(paths)
                .map(|path| FileReport {
                    path,
                    outcome: FileOutcome::NotCompared,
                })
                .collect();
            return Ok(ReconcileReport { album: None, files });
        }

        let index = self.fetch_index().await?;
        let described = self.describe_all(paths)?;
        let report = build_report(described, &index, self.config.tolerance_minutes);

        info!(
            matched = report.matched(),
            to_upload = report.to_upload(),
            failed = report.failed(),
            "Reconciliation finished"
        );
        Ok(report)
    }
}

/// Finds the album titled `title`.
///
/// By default the first case-insensitive match wins and a missing album is `None`. With
/// `strict`, the whole listing is read and anything but exactly one match is an error.
pub async fn resolve_album(
    photos: &PhotosLibraryClient,
    title: &str,
    app_created_only: bool,
    strict: bool,
) -> Result<Option<Album>, ReconcileError> {
    if !strict {
        return Ok(photos.find_album(title, app_created_only).await?);
    }

    let mut albums = photos.find_albums(title, app_created_only).await?;
    match albums.len() {
        0 => Err(ReconcileError::AlbumNotFound(title.to_string())),
        1 => Ok(Some(albums.remove(0))),
        count => Err(ReconcileError::AmbiguousAlbum {
            title: title.to_string(),
            count,
        }),
    }
}

/// Decides every descriptor against the same index.
///
/// Keys are unique by path; a path given twice is decided once, from its first descriptor.
pub fn reconcile(
    local_descriptors: &[LocalMediaDescriptor],
    remote_index: &RemoteAlbumIndex,
    tolerance_minutes: u32,
) -> HashMap<PathBuf, MatchVerdict> {
    let mut verdicts = HashMap::with_capacity(local_descriptors.len());
    for local in local_descriptors {
        verdicts
            .entry(local.path.clone())
            .or_insert_with(|| decide(local, remote_index.items(), tolerance_minutes));
    }
    verdicts
}

/// Turns described files into a report, keeping input order.
pub fn build_report(
    described: Vec<(PathBuf, Result<LocalMediaDescriptor, DescriptorError>)>,
    remote_index: &RemoteAlbumIndex,
    tolerance_minutes: u32,
) -> ReconcileReport {
    let files = described
        .into_iter()
        .map(|(path, descriptor)| {
            let outcome = match descriptor {
                Ok(local) => {
                    FileOutcome::Verdict(decide(&local, remote_index.items(), tolerance_minutes))
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Could not describe file");
                    FileOutcome::Failed(e.to_string())
                }
            };
            FileReport { path, outcome }
        })
        .collect();

    ReconcileReport {
        album: remote_index.album().cloned(),
        files,
    }
}

fn unique_paths(paths: &[PathBuf]) -> impl Iterator<Item = PathBuf> + '_ {
    let mut seen = HashSet::new();
    paths
        .iter()
        .filter(move |&path| seen.insert(path.as_path()))
        .cloned()
}
