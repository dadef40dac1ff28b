use crate::api::{Call, LastFmApi, LastFmApiImpl, QueryParams};
use crate::config::LastFmConfig;
use crate::de;
use crate::period::StatsTimeSpan;
use crate::types::{
    Album, AlbumInfo, AlbumResponse, Artist, PageAttr, PageResponse, Response, Track, User,
    UserResponse,
};
use crate::Result;
use async_trait::async_trait;
use http_client::HttpClient;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::sync::Arc;

/// Typed access to the user, track and album resources of the Last.fm API.
///
/// Paged listings turn a rejected call into
/// [`LastFmError::Api`](crate::LastFmError::Api); lookups return a
/// [`Response`] whose `success` flag the caller checks.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockLastFmClient`
/// that implements this trait using the `mockall` library.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait LastFmClient: Send + Sync {
    /// The user's most recent scrobbles, newest first, including the track
    /// currently playing.
    async fn get_recent_scrobbles(&self, username: &str, count: u32)
        -> Result<PageResponse<Track>>;

    /// A user's profile.
    async fn get_user_info(&self, username: &str) -> Result<Response<User>>;

    /// Tracks matching a free-text query.
    async fn search_track(&self, query: &str, items_per_page: u32)
        -> Result<PageResponse<Track>>;

    /// Albums matching a free-text query.
    async fn search_album(&self, query: &str, items_per_page: u32)
        -> Result<PageResponse<Album>>;

    /// Global album details, including cover art.
    async fn get_album_info(&self, artist: &str, album: &str) -> Result<Response<AlbumInfo>>;

    /// A user's most played albums over a time span.
    async fn get_top_albums(
        &self,
        username: &str,
        time_span: StatsTimeSpan,
        page: u32,
        count: u32,
    ) -> Result<PageResponse<Album>>;

    /// A user's most played artists over a time span.
    async fn get_top_artists(
        &self,
        username: &str,
        time_span: StatsTimeSpan,
        page: u32,
        count: u32,
    ) -> Result<PageResponse<Artist>>;
}

/// [`LastFmClient`] built on any [`LastFmApi`] dispatcher.
///
/// # Examples
///
/// ```rust,no_run
/// use fmbot_lastfm::{LastFmClient, LastFmClientImpl, LastFmConfig};
///
/// # tokio_test::block_on(async {
/// let client = LastFmClientImpl::new(
///     Box::new(http_client::native::NativeClient::new()),
///     LastFmConfig::new("api-key"),
/// );
///
/// let recent = client.get_recent_scrobbles("rj", 5).await?;
/// for track in &recent.items {
///     println!("{track}");
/// }
/// # Ok::<(), fmbot_lastfm::LastFmError>(())
/// # });
/// ```
#[derive(Clone)]
pub struct LastFmClientImpl {
    api: Arc<dyn LastFmApi>,
}

impl LastFmClientImpl {
    /// Create a client that sends requests through the given HTTP client.
    pub fn new(client: Box<dyn HttpClient + Send + Sync>, config: LastFmConfig) -> Self {
        Self::with_api(Arc::new(LastFmApiImpl::new(client, config)))
    }

    /// Create a client on top of an existing dispatcher.
    pub fn with_api(api: Arc<dyn LastFmApi>) -> Self {
        Self { api }
    }

    async fn fetch<T: DeserializeOwned>(&self, call: Call, params: QueryParams) -> Result<Response<T>> {
        self.api.call_api(call, &params).await?.decode()
    }
}

fn params<const N: usize>(pairs: [(&str, String); N]) -> QueryParams {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[async_trait]
impl LastFmClient for LastFmClientImpl {
    async fn get_recent_scrobbles(
        &self,
        username: &str,
        count: u32,
    ) -> Result<PageResponse<Track>> {
        log::debug!("Fetching {count} recent scrobbles for {username}");
        let response: RecentTracksResponse = self
            .fetch(
                Call::RecentTracks,
                params([("user", username.to_string()), ("limit", count.to_string())]),
            )
            .await?
            .into_result()?;
        let listing = response.recent_tracks;
        Ok(PageResponse::from_attr(listing.track, &listing.attr))
    }

    async fn get_user_info(&self, username: &str) -> Result<Response<User>> {
        let response: Response<UserResponse> = self
            .fetch(Call::UserInfo, params([("user", username.to_string())]))
            .await?;
        Ok(response.map(|r| r.user))
    }

    async fn search_track(
        &self,
        query: &str,
        items_per_page: u32,
    ) -> Result<PageResponse<Track>> {
        log::debug!("Searching tracks for {query:?}");
        let response: SearchResponse<TrackMatches> = self
            .fetch(
                Call::TrackSearch,
                params([
                    ("track", query.to_string()),
                    ("limit", items_per_page.to_string()),
                    ("page", "1".to_string()),
                ]),
            )
            .await?
            .into_result()?;
        Ok(response.results.into_page(|matches| matches.track))
    }

    async fn search_album(
        &self,
        query: &str,
        items_per_page: u32,
    ) -> Result<PageResponse<Album>> {
        log::debug!("Searching albums for {query:?}");
        let response: SearchResponse<AlbumMatches> = self
            .fetch(
                Call::AlbumSearch,
                params([
                    ("album", query.to_string()),
                    ("limit", items_per_page.to_string()),
                    ("page", "1".to_string()),
                ]),
            )
            .await?
            .into_result()?;
        Ok(response.results.into_page(|matches| matches.album))
    }

    async fn get_album_info(&self, artist: &str, album: &str) -> Result<Response<AlbumInfo>> {
        let response: Response<AlbumResponse> = self
            .fetch(
                Call::AlbumInfo,
                params([("artist", artist.to_string()), ("album", album.to_string())]),
            )
            .await?;
        Ok(response.map(|r| r.album))
    }

    async fn get_top_albums(
        &self,
        username: &str,
        time_span: StatsTimeSpan,
        page: u32,
        count: u32,
    ) -> Result<PageResponse<Album>> {
        let response: TopAlbumsResponse = self
            .fetch(
                Call::TopAlbums,
                params([
                    ("user", username.to_string()),
                    ("period", time_span.api_value().to_string()),
                    ("page", page.to_string()),
                    ("limit", count.to_string()),
                ]),
            )
            .await?
            .into_result()?;
        let listing = response.top_albums;
        Ok(PageResponse::from_attr(listing.album, &listing.attr))
    }

    async fn get_top_artists(
        &self,
        username: &str,
        time_span: StatsTimeSpan,
        page: u32,
        count: u32,
    ) -> Result<PageResponse<Artist>> {
        let response: TopArtistsResponse = self
            .fetch(
                Call::TopArtists,
                params([
                    ("user", username.to_string()),
                    ("period", time_span.api_value().to_string()),
                    ("page", page.to_string()),
                    ("limit", count.to_string()),
                ]),
            )
            .await?
            .into_result()?;
        let listing = response.top_artists;
        Ok(PageResponse::from_attr(listing.artist, &listing.attr))
    }
}

// =============================================================================
// Listing envelopes
// =============================================================================

#[derive(Deserialize)]
struct RecentTracksResponse {
    #[serde(rename = "recenttracks")]
    recent_tracks: TrackListing,
}

#[derive(Deserialize)]
struct TrackListing {
    #[serde(default, deserialize_with = "de::one_or_many")]
    track: Vec<Track>,
    #[serde(rename = "@attr", default)]
    attr: PageAttr,
}

#[derive(Deserialize)]
struct TopAlbumsResponse {
    #[serde(rename = "topalbums")]
    top_albums: AlbumListing,
}

#[derive(Deserialize)]
struct AlbumListing {
    #[serde(default, deserialize_with = "de::one_or_many")]
    album: Vec<Album>,
    #[serde(rename = "@attr", default)]
    attr: PageAttr,
}

#[derive(Deserialize)]
struct TopArtistsResponse {
    #[serde(rename = "topartists")]
    top_artists: ArtistListing,
}

#[derive(Deserialize)]
struct ArtistListing {
    #[serde(default, deserialize_with = "de::one_or_many")]
    artist: Vec<Artist>,
    #[serde(rename = "@attr", default)]
    attr: PageAttr,
}

#[derive(Deserialize)]
struct SearchResponse<M> {
    results: SearchResults<M>,
}

#[derive(Deserialize)]
struct SearchResults<M> {
    #[serde(rename = "opensearch:totalResults", default, deserialize_with = "de::number")]
    total_results: u64,
    #[serde(rename = "opensearch:startIndex", default, deserialize_with = "de::number")]
    start_index: u64,
    #[serde(rename = "opensearch:itemsPerPage", default, deserialize_with = "de::number")]
    items_per_page: u64,
    #[serde(alias = "trackmatches", alias = "albummatches")]
    matches: M,
}

impl<M> SearchResults<M> {
    fn into_page<T>(self, items: impl FnOnce(M) -> Vec<T>) -> PageResponse<T> {
        let per_page = self.items_per_page.max(1);
        PageResponse {
            items: items(self.matches),
            page: (self.start_index / per_page + 1) as u32,
            per_page: per_page as u32,
            total_pages: self.total_results.div_ceil(per_page) as u32,
            total_items: self.total_results,
        }
    }
}

#[derive(Deserialize)]
struct TrackMatches {
    #[serde(default, deserialize_with = "de::one_or_many")]
    track: Vec<Track>,
}

#[derive(Deserialize)]
struct AlbumMatches {
    #[serde(default, deserialize_with = "de::one_or_many")]
    album: Vec<Album>,
}
