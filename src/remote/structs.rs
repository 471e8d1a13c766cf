use super::types::{ApiAlbum, ApiMediaItem};
use crate::time::normalize_timestamp;
use crate::time::structs::RawTimestamp;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A remote album.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    pub id: String,
    pub title: String,
    pub media_items_count: Option<u64>,
    pub is_writeable: bool,
}

impl Album {
    /// Case-insensitive title comparison used for album lookup.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }
}

impl From<ApiAlbum> for Album {
    fn from(album: ApiAlbum) -> Self {
        Self {
            id: album.id,
            title: album.title,
            media_items_count: album.media_items_count.and_then(|c| c.parse().ok()),
            is_writeable: album.is_writeable.unwrap_or(false),
        }
    }
}

/// Identity-relevant attributes of one item in a remote album.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMediaDescriptor {
    pub filename: String,
    /// MIME type exactly as the remote service reports it.
    pub mime_type: String,
    /// Creation time string as returned; empty when the service sent none.
    pub creation_time_raw: String,
}

impl RemoteMediaDescriptor {
    /// The creation instant parsed from `creation_time_raw`, or `None` if it is empty or malformed.
    pub fn creation_time(&self) -> Option<DateTime<Utc>> {
        normalize_timestamp(RawTimestamp::Remote(&self.creation_time_raw), Tz::UTC)
    }
}

impl From<ApiMediaItem> for RemoteMediaDescriptor {
    fn from(item: ApiMediaItem) -> Self {
        Self {
            filename: item.filename,
            mime_type: item.mime_type,
            creation_time_raw: item
                .media_metadata
                .and_then(|m| m.creation_time)
                .unwrap_or_default(),
        }
    }
}

/// The complete contents of one album, paginated to the end.
///
/// Only ever constructed from a finished listing, so matching never sees a partial album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAlbumIndex {
    album: Option<Album>,
    items: Vec<RemoteMediaDescriptor>,
}

impl RemoteAlbumIndex {
    pub fn new(album: Album, items: Vec<RemoteMediaDescriptor>) -> Self {
        Self {
            album: Some(album),
            items,
        }
    }

    /// An index that is not tied to a listed album, e.g. for offline comparison.
    pub fn from_items(items: Vec<RemoteMediaDescriptor>) -> Self {
        Self { album: None, items }
    }

    pub fn album(&self) -> Option<&Album> {
        self.album.as_ref()
    }

    pub fn items(&self) -> &[RemoteMediaDescriptor] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::types::ApiMediaMetadata;

    #[test]
    fn test_creation_time_parses_lazily_and_never_fails() {
        let mut item = RemoteMediaDescriptor {
            filename: "a.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
            creation_time_raw: "2021-06-01T10:00:00Z".to_string(),
        };
        assert_eq!(
            item.creation_time().unwrap().to_rfc3339(),
            "2021-06-01T10:00:00+00:00"
        );

        item.creation_time_raw = String::new();
        assert!(item.creation_time().is_none());

        item.creation_time_raw = "not a time".to_string();
        assert!(item.creation_time().is_none());
    }

    #[test]
    fn test_from_api_item_without_metadata() {
        let item: RemoteMediaDescriptor = ApiMediaItem {
            filename: "b.mp4".to_string(),
            mime_type: "video/mp4".to_string(),
            media_metadata: Some(ApiMediaMetadata {
                creation_time: None,
            }),
        }
        .into();
        assert_eq!(item.creation_time_raw, "");
        assert!(item.creation_time().is_none());
    }

    #[test]
    fn test_album_title_matching_ignores_case() {
        let album: Album = ApiAlbum {
            id: "a1".to_string(),
            title: "Summer Holiday".to_string(),
            media_items_count: Some("12".to_string()),
            is_writeable: None,
        }
        .into();
        assert!(album.title_matches("summer holiday"));
        assert!(album.title_matches("SUMMER HOLIDAY"));
        assert!(!album.title_matches("Summer"));
        assert_eq!(album.media_items_count, Some(12));
        assert!(!album.is_writeable);
    }
}
