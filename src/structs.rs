use crate::matching::structs::MatchVerdict;
use crate::remote::structs::Album;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// What should happen to a file after reconciliation.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UploadAction {
    Skip,
    Upload,
}

impl fmt::Display for UploadAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Upload => write!(f, "upload"),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FileOutcome {
    Verdict(MatchVerdict),
    /// Comparison was skipped on request; the file is uploaded unconditionally.
    NotCompared,
    /// The file could not be described. It is neither uploaded nor skipped.
    Failed(String),
}

impl FileOutcome {
    /// `None` for failed files.
    pub fn upload_action(&self) -> Option<UploadAction> {
        match self {
            Self::Verdict(verdict) if verdict.is_match => Some(UploadAction::Skip),
            Self::Verdict(_) | Self::NotCompared => Some(UploadAction::Upload),
            Self::Failed(_) => None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: FileOutcome,
}

/// Per-file outcomes of a batch, in input order.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileReport {
    /// `None` when comparison was skipped.
    pub album: Option<Album>,
    pub files: Vec<FileReport>,
}

impl ReconcileReport {
    fn count(&self, action: Option<UploadAction>) -> usize {
        self.files
            .iter()
            .filter(|file| file.outcome.upload_action() == action)
            .count()
    }

    pub fn matched(&self) -> usize {
        self.count(Some(UploadAction::Skip))
    }

    pub fn to_upload(&self) -> usize {
        self.count(Some(UploadAction::Upload))
    }

    pub fn failed(&self) -> usize {
        self.count(None)
    }

    /// Paths the upload step should act on.
    pub fn files_to_upload(&self) -> impl Iterator<Item = &Path> {
        self.files
            .iter()
            .filter(|file| file.outcome.upload_action() == Some(UploadAction::Upload))
            .map(|file| file.path.as_path())
    }
}
