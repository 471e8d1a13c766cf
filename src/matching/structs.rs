use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the matching pipeline, recorded in the order it was evaluated.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "stage", rename_all = "camelCase")]
pub enum StageOutcome {
    NoFilenameMatch,
    FilenameMatch,
    MimeMismatch {
        local: String,
        remote: String,
    },
    MimeMatch,
    CaptureTimeMatch,
    /// `remote` is `None` when the remote creation time was missing or unparsable.
    CaptureTimeMismatch {
        local: DateTime<Utc>,
        remote: Option<DateTime<Utc>>,
    },
    /// No capture time and a zero tolerance, so the access-time fallback was not tried.
    FallbackDisabled,
    RemoteTimeMissing,
    /// `delta_seconds` is local access time minus remote creation time.
    AccessTimeWithinTolerance {
        delta_seconds: i64,
    },
    AccessTimeOutsideTolerance {
        delta_seconds: i64,
    },
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoFilenameMatch => write!(f, "no filename match"),
            Self::FilenameMatch => write!(f, "filename match"),
            Self::MimeMismatch { local, remote } => {
                write!(f, "mime mismatch ({local} != {remote})")
            }
            Self::MimeMatch => write!(f, "mime match"),
            Self::CaptureTimeMatch => write!(f, "capture time match"),
            Self::CaptureTimeMismatch {
                local,
                remote: Some(remote),
            } => write!(f, "capture time mismatch ({local} != {remote})"),
            Self::CaptureTimeMismatch {
                local,
                remote: None,
            } => write!(f, "capture time mismatch ({local} != no remote time)"),
            Self::FallbackDisabled => write!(f, "no capture time, fallback disabled"),
            Self::RemoteTimeMissing => write!(f, "remote creation time missing"),
            Self::AccessTimeWithinTolerance { delta_seconds } => {
                write!(f, "access time within tolerance ({delta_seconds}s)")
            }
            Self::AccessTimeOutsideTolerance { delta_seconds } => {
                write!(f, "access time outside tolerance ({delta_seconds}s)")
            }
        }
    }
}

/// The decision for one local file against one remote album.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MatchVerdict {
    /// An item with the same filename exists in the album.
    pub exists_in_album: bool,
    /// The item is considered the same media, so no upload is needed.
    pub is_match: bool,
    pub trail: Vec<StageOutcome>,
}

impl MatchVerdict {
    pub fn should_upload(&self) -> bool {
        !self.is_match
    }

    /// The outcome of the last stage that ran, which is the one that decided the verdict.
    pub fn deciding_outcome(&self) -> Option<&StageOutcome> {
        self.trail.last()
    }

    /// Signed access-time delta, if the fallback stage compared one.
    pub fn access_time_delta_seconds(&self) -> Option<i64> {
        self.trail.iter().find_map(|outcome| match outcome {
            StageOutcome::AccessTimeWithinTolerance { delta_seconds }
            | StageOutcome::AccessTimeOutsideTolerance { delta_seconds } => Some(*delta_seconds),
            _ => None,
        })
    }
}
