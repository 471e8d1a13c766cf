//! Photo library API client: paginated album and album-content listings.

use super::error::IndexError;
use super::http::{HttpClient, HttpMethod, HttpRequest};
use super::structs::{Album, RemoteAlbumIndex, RemoteMediaDescriptor};
use super::types::{
    AlbumsListResponse, ApiAlbum, ApiMediaItem, MediaItemsSearchRequest, MediaItemsSearchResponse,
};
use futures::{Stream, TryStreamExt, future, stream};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Photo library API base URL
pub const PHOTOS_API_BASE: &str = "https://photoslibrary.googleapis.com/v1";

/// Page size requested from `mediaItems:search` (the API maximum is 100)
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Where a paginated listing stands between requests.
enum PageCursor {
    First,
    Next(String),
    Exhausted,
}

impl PageCursor {
    fn after(next_page_token: Option<String>) -> Self {
        match next_page_token {
            Some(token) if !token.is_empty() => Self::Next(token),
            _ => Self::Exhausted,
        }
    }
}

/// Read-only client for album listings.
///
/// Listings are exposed as streams that request the next page only once the current
/// one has been consumed, and stop at the first page that carries no continuation token.
/// A failed page ends the stream with that error; already-yielded items are not retried.
pub struct PhotosLibraryClient {
    http: Arc<dyn HttpClient>,
    access_token: String,
    base_url: String,
    page_size: u32,
}

impl PhotosLibraryClient {
    /// Create a client using an already-obtained OAuth 2.0 access token.
    pub fn new(http: Arc<dyn HttpClient>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            access_token: access_token.into(),
            base_url: PHOTOS_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[instrument(skip(self))]
    async fn fetch_albums_page(
        &self,
        app_created_only: bool,
        page_token: Option<&str>,
    ) -> Result<AlbumsListResponse, IndexError> {
        let mut url = format!(
            "{}/albums?excludeNonAppCreatedData={}",
            self.base_url, app_created_only
        );
        if let Some(token) = page_token {
            url.push_str(&format!("&pageToken={}", urlencoding::encode(token)));
        }

        let request = HttpRequest::new(HttpMethod::Get, url)
            .bearer_token(&self.access_token)
            .header("Accept", "application/json");
        let page: AlbumsListResponse = self.http.execute(request).await?.error_for_status()?.json()?;

        debug!(
            albums = page.albums.len(),
            has_next = page.next_page_token.is_some(),
            "Fetched albums page"
        );
        Ok(page)
    }

    #[instrument(skip(self))]
    async fn fetch_media_items_page(
        &self,
        album_id: &str,
        page_token: Option<&str>,
    ) -> Result<MediaItemsSearchResponse, IndexError> {
        let url = format!("{}/mediaItems:search", self.base_url);
        let body = MediaItemsSearchRequest {
            album_id,
            page_size: self.page_size,
            page_token,
        };

        let request = HttpRequest::new(HttpMethod::Post, url)
            .bearer_token(&self.access_token)
            .json(&body)?;
        let page: MediaItemsSearchResponse =
            self.http.execute(request).await?.error_for_status()?.json()?;

        debug!(
            items = page.media_items.len(),
            has_next = page.next_page_token.is_some(),
            "Fetched media items page"
        );
        Ok(page)
    }

    /// Lists albums, optionally only those created by this application.
    pub fn list_albums(
        &self,
        app_created_only: bool,
    ) -> impl Stream<Item = Result<Album, IndexError>> + '_ {
        stream::try_unfold(PageCursor::First, move |cursor| async move {
            let token = match cursor {
                PageCursor::Exhausted => return Ok::<_, IndexError>(None),
                PageCursor::First => None,
                PageCursor::Next(token) => Some(token),
            };
            let page = self
                .fetch_albums_page(app_created_only, token.as_deref())
                .await?;
            Ok(Some((page.albums, PageCursor::after(page.next_page_token))))
        })
        .map_ok(|albums| stream::iter(albums.into_iter().map(Ok::<ApiAlbum, IndexError>)))
        .try_flatten()
        .map_ok(Album::from)
    }

    /// Lists the items of one album in the order the service returns them.
    pub fn list_album_items(
        &self,
        album: &Album,
    ) -> impl Stream<Item = Result<RemoteMediaDescriptor, IndexError>> + '_ {
        let album_id = album.id.clone();
        stream::try_unfold(PageCursor::First, move |cursor| {
            let album_id = album_id.clone();
            async move {
                let token = match cursor {
                    PageCursor::Exhausted => return Ok::<_, IndexError>(None),
                    PageCursor::First => None,
                    PageCursor::Next(token) => Some(token),
                };
                let page = self
                    .fetch_media_items_page(&album_id, token.as_deref())
                    .await?;
                Ok(Some((page.media_items, PageCursor::after(page.next_page_token))))
            }
        })
        .map_ok(|items| stream::iter(items.into_iter().map(Ok::<ApiMediaItem, IndexError>)))
        .try_flatten()
        .map_ok(RemoteMediaDescriptor::from)
    }

    /// Returns the first album whose title matches case-insensitively.
    ///
    /// Pagination stops as soon as a match is seen, so later albums with the same title
    /// are never considered. Use [`Self::find_albums`] to detect duplicates.
    #[instrument(skip(self))]
    pub async fn find_album(
        &self,
        title: &str,
        app_created_only: bool,
    ) -> Result<Option<Album>, IndexError> {
        let mut albums = std::pin::pin!(self.list_albums(app_created_only));
        while let Some(album) = albums.try_next().await? {
            if album.title_matches(title) {
                debug!(album_id = %album.id, "Found album");
                return Ok(Some(album));
            }
        }
        Ok(None)
    }

    /// Returns every album whose title matches case-insensitively, in listing order.
    #[instrument(skip(self))]
    pub async fn find_albums(
        &self,
        title: &str,
        app_created_only: bool,
    ) -> Result<Vec<Album>, IndexError> {
        self.list_albums(app_created_only)
            .try_filter(|album| future::ready(album.title_matches(title)))
            .try_collect()
            .await
    }

    /// Paginates an album to completion.
    #[instrument(skip(self, album), fields(album_id = %album.id, title = %album.title))]
    pub async fn album_index(&self, album: &Album) -> Result<RemoteAlbumIndex, IndexError> {
        let items: Vec<RemoteMediaDescriptor> = self.list_album_items(album).try_collect().await?;
        info!(items = items.len(), "Indexed album contents");
        Ok(RemoteAlbumIndex::new(album.clone(), items))
    }
}
