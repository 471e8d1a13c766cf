use crate::remote::DEFAULT_PAGE_SIZE;
use crate::time::error::TimeError;
use crate::time::parse_timezone;
use crate::time::structs::DEFAULT_TIMEZONE_HYPOTHESIS;
use bon::Builder;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Operator settings for one reconciliation run.
///
/// ```rust
/// # use media_reconciler::ReconcileConfig;
/// let config = ReconcileConfig::builder()
///     .album_title("Summer 2021")
///     .tolerance_minutes(10)
///     .build();
/// assert_eq!(config.timezone_hypothesis, "Europe/London");
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq, Builder)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileConfig {
    /// Title of the target album, compared case-insensitively.
    #[builder(into)]
    pub album_title: String,

    /// Window for the access-time fallback. Zero disables the fallback.
    #[serde(default)]
    #[builder(default)]
    pub tolerance_minutes: u32,

    /// IANA zone assumed for capture times that carry no offset.
    #[serde(default = "default_timezone_hypothesis")]
    #[builder(into, default = String::from(DEFAULT_TIMEZONE_HYPOTHESIS))]
    pub timezone_hypothesis: String,

    /// Only consider albums created by this application.
    #[serde(default = "default_true")]
    #[builder(default = true)]
    pub app_created_only: bool,

    /// Fail when several albums share the title instead of taking the first.
    #[serde(default)]
    #[builder(default)]
    pub strict_album_lookup: bool,

    /// Mark every file for upload without fetching the album.
    #[serde(default)]
    #[builder(default)]
    pub skip_compare: bool,

    #[serde(default = "default_page_size")]
    #[builder(default = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,
}

fn default_timezone_hypothesis() -> String {
    DEFAULT_TIMEZONE_HYPOTHESIS.to_string()
}

fn default_true() -> bool {
    true
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl ReconcileConfig {
    /// Resolves the timezone hypothesis.
    ///
    /// # Errors
    ///
    /// [`TimeError::InvalidTimezone`] if the name is not a known IANA zone.
    pub fn timezone(&self) -> Result<Tz, TimeError> {
        parse_timezone(&self.timezone_hypothesis)
    }
}
