//! Photo library API request and response types.

use serde::{Deserialize, Serialize};

/// Album resource as returned by `GET /albums`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiAlbum {
    pub id: String,

    #[serde(default)]
    pub title: String,

    /// int64 encoded as a JSON string
    #[serde(default)]
    pub media_items_count: Option<String>,

    #[serde(default)]
    pub is_writeable: Option<bool>,
}

/// `GET /albums` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlbumsListResponse {
    #[serde(default)]
    pub albums: Vec<ApiAlbum>,

    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// `POST /mediaItems:search` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItemsSearchRequest<'a> {
    pub album_id: &'a str,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<&'a str>,
}

/// Media item resource, reduced to the fields used for matching.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMediaItem {
    pub filename: String,

    #[serde(default)]
    pub mime_type: String,

    #[serde(default)]
    pub media_metadata: Option<ApiMediaMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMediaMetadata {
    /// RFC 3339, UTC
    #[serde(default)]
    pub creation_time: Option<String>,
}

/// `POST /mediaItems:search` response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItemsSearchResponse {
    #[serde(default)]
    pub media_items: Vec<ApiMediaItem>,

    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_search_response() {
        let json = r#"{
            "mediaItems": [
                {
                    "id": "item1",
                    "filename": "a.jpg",
                    "mimeType": "image/jpeg",
                    "mediaMetadata": { "creationTime": "2021-06-01T10:00:00Z", "width": "4000" }
                },
                { "id": "item2", "filename": "b.mp4", "mimeType": "video/mp4" }
            ],
            "nextPageToken": "token123"
        }"#;

        let response: MediaItemsSearchResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.media_items.len(), 2);
        assert_eq!(
            response.media_items[0]
                .media_metadata
                .as_ref()
                .and_then(|m| m.creation_time.as_deref()),
            Some("2021-06-01T10:00:00Z")
        );
        assert!(response.media_items[1].media_metadata.is_none());
        assert_eq!(response.next_page_token.as_deref(), Some("token123"));
    }

    #[test]
    fn test_empty_album_has_no_media_items_key() {
        let response: MediaItemsSearchResponse = serde_json::from_str("{}").unwrap();
        assert!(response.media_items.is_empty());
        assert!(response.next_page_token.is_none());
    }

    #[test]
    fn test_search_request_omits_missing_token() {
        let first = MediaItemsSearchRequest {
            album_id: "a1",
            page_size: 100,
            page_token: None,
        };
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            r#"{"albumId":"a1","pageSize":100}"#
        );
    }
}
