use crate::api::{Call, LastFmApi, LastFmApiImpl, QueryParams};
use crate::client::{LastFmClient, LastFmClientImpl};
use crate::config::LastFmConfig;
use crate::metrics::ApiCallCounter;
use crate::period::{CallTimePeriod, StatsTimeSpan};
use crate::types::{
    Album, AlbumResponse, Artist, ArtistResponse, ImageSet, PageResponse, Response,
    TopTracksResponse, Track, TrackInfo, TrackResponse, User,
};
use crate::{LastFmError, Result};
use http_client::{HttpClient, Request};
use http_types::{Method, StatusCode, Url};
use image::DynamicImage;
use std::sync::Arc;

/// Number of items the bot asks for when a command does not say.
pub const DEFAULT_COUNT: u32 = 2;

/// Outcome of downloading album artwork.
#[derive(Debug)]
pub enum AlbumImage {
    /// The image was downloaded and decoded
    Loaded(DynamicImage),
    /// There is no image at that location
    Missing,
    /// The image could not be fetched or decoded
    Failed(LastFmError),
}

impl AlbumImage {
    /// The decoded image, treating missing and failed downloads alike.
    pub fn into_image(self) -> Option<DynamicImage> {
        match self {
            AlbumImage::Loaded(image) => Some(image),
            AlbumImage::Missing | AlbumImage::Failed(_) => None,
        }
    }
}

/// The Last.fm operations used by the bot's commands.
///
/// Every call against Last.fm bumps the [`ApiCallCounter`] once, whether it
/// succeeds or not.
///
/// # Examples
///
/// ```rust,no_run
/// # use fmbot_lastfm::{format, LastFmConfig, LastFmService};
/// # tokio_test::block_on(async {
/// let service = LastFmService::from_config(
///     Box::new(http_client::native::NativeClient::new()),
///     LastFmConfig::from_env()?,
/// );
///
/// let recent = service.get_recent_scrobbles("rj", 1).await?;
/// if let Some(track) = recent.first() {
///     println!("{}", format::track_to_linked_string(track));
/// }
/// # Ok::<(), fmbot_lastfm::LastFmError>(())
/// # });
/// ```
#[derive(Clone)]
pub struct LastFmService {
    client: Arc<dyn LastFmClient>,
    api: Arc<dyn LastFmApi>,
    http: Arc<dyn HttpClient + Send + Sync>,
    calls: Arc<ApiCallCounter>,
}

impl LastFmService {
    /// Assemble the service from its collaborators, counting into the global counter.
    pub fn new(
        client: Arc<dyn LastFmClient>,
        api: Arc<dyn LastFmApi>,
        http: Arc<dyn HttpClient + Send + Sync>,
    ) -> Self {
        Self {
            client,
            api,
            http,
            calls: ApiCallCounter::global(),
        }
    }

    /// Build the whole stack over one HTTP client.
    pub fn from_config(http: Box<dyn HttpClient + Send + Sync>, config: LastFmConfig) -> Self {
        let http: Arc<dyn HttpClient + Send + Sync> = Arc::from(http);
        let api: Arc<dyn LastFmApi> = Arc::new(LastFmApiImpl::from_shared(http.clone(), config));
        let client = Arc::new(LastFmClientImpl::with_api(api.clone()));
        Self::new(client, api, http)
    }

    /// Count into a different counter.
    pub fn with_call_counter(mut self, calls: Arc<ApiCallCounter>) -> Self {
        self.calls = calls;
        self
    }

    pub fn call_counter(&self) -> &Arc<ApiCallCounter> {
        &self.calls
    }

    fn counted<T>(&self, result: T) -> T {
        self.calls.inc();
        result
    }

    // Recent scrobbles

    pub async fn get_recent_scrobbles(
        &self,
        username: &str,
        count: u32,
    ) -> Result<PageResponse<Track>> {
        self.counted(self.client.get_recent_scrobbles(username, count).await)
    }

    // User

    pub async fn get_user_info(&self, username: &str) -> Result<Response<User>> {
        self.counted(self.client.get_user_info(username).await)
    }

    /// Whether a Last.fm account with this name exists.
    pub async fn lastfm_user_exists(&self, username: &str) -> Result<bool> {
        let response = self.counted(self.client.get_user_info(username).await)?;
        Ok(response.success)
    }

    // Search

    /// The best matching track, as a page of at most one.
    pub async fn search_track(&self, query: &str) -> Result<PageResponse<Track>> {
        self.counted(self.client.search_track(query, 1).await)
    }

    /// The best matching album, as a page of at most one.
    pub async fn search_album(&self, query: &str) -> Result<PageResponse<Album>> {
        self.counted(self.client.search_album(query, 1).await)
    }

    // Info

    /// Track details, personalised when a username is given.
    ///
    /// `None` when Last.fm does not know the track.
    pub async fn get_track_info(
        &self,
        track_name: &str,
        artist_name: &str,
        username: Option<&str>,
    ) -> Result<Option<TrackInfo>> {
        let mut params = QueryParams::new();
        params.insert("artist".to_string(), artist_name.to_string());
        params.insert("track".to_string(), track_name.to_string());
        insert_username(&mut params, username);
        params.insert("autocorrect".to_string(), "1".to_string());

        let response: Response<TrackResponse> = self.dispatch(Call::TrackInfo, params).await?;
        Ok(response.into_content().map(|r| r.track))
    }

    pub async fn get_artist_info(
        &self,
        artist_name: &str,
        username: Option<&str>,
    ) -> Result<Response<ArtistResponse>> {
        let mut params = QueryParams::new();
        params.insert("artist".to_string(), artist_name.to_string());
        insert_username(&mut params, username);
        params.insert("autocorrect".to_string(), "1".to_string());

        self.dispatch(Call::ArtistInfo, params).await
    }

    pub async fn get_album_info(
        &self,
        artist_name: &str,
        album_name: &str,
        username: Option<&str>,
    ) -> Result<Response<AlbumResponse>> {
        let mut params = QueryParams::new();
        params.insert("artist".to_string(), artist_name.to_string());
        params.insert("album".to_string(), album_name.to_string());
        insert_username(&mut params, username);

        self.dispatch(Call::AlbumInfo, params).await
    }

    // Album images

    /// Cover art URLs of an album, if Last.fm knows the album.
    pub async fn get_album_images(
        &self,
        artist_name: &str,
        album_name: &str,
    ) -> Result<Option<ImageSet>> {
        let response = self.counted(self.client.get_album_info(artist_name, album_name).await)?;
        Ok(response.into_content().map(|album| album.images))
    }

    /// Download and decode an image.
    ///
    /// Never fails: problems are reported through [`AlbumImage`].
    pub async fn get_album_image(&self, url: &str) -> AlbumImage {
        if url.trim().is_empty() {
            return AlbumImage::Missing;
        }

        match self.download_image(url).await {
            Ok(Some(image)) => AlbumImage::Loaded(image),
            Ok(None) => AlbumImage::Missing,
            Err(e) => {
                log::warn!("Could not load image {url}: {e}");
                AlbumImage::Failed(e)
            }
        }
    }

    async fn download_image(&self, url: &str) -> Result<Option<DynamicImage>> {
        let url = url
            .parse::<Url>()
            .map_err(|e| LastFmError::Http(format!("invalid image URL {url}: {e}")))?;

        let mut response = self
            .http
            .send(Request::new(Method::Get, url))
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))?;

        if response.status() == StatusCode::NotFound {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(LastFmError::Http(format!(
                "unexpected status {}",
                response.status()
            )));
        }

        let bytes = response
            .body_bytes()
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))?;
        Ok(Some(image::load_from_memory(&bytes)?))
    }

    // Top lists

    pub async fn get_top_albums(
        &self,
        username: &str,
        time_span: StatsTimeSpan,
        count: u32,
    ) -> Result<PageResponse<Album>> {
        self.counted(self.client.get_top_albums(username, time_span, 1, count).await)
    }

    pub async fn get_top_artists(
        &self,
        username: &str,
        time_span: StatsTimeSpan,
        count: u32,
    ) -> Result<PageResponse<Artist>> {
        self.counted(self.client.get_top_artists(username, time_span, 1, count).await)
    }

    pub async fn get_top_tracks(
        &self,
        username: &str,
        period: CallTimePeriod,
        count: u32,
    ) -> Result<Response<TopTracksResponse>> {
        let mut params = QueryParams::new();
        params.insert("limit".to_string(), count.to_string());
        // user.getTopTracks takes `user`, not `username`
        params.insert("user".to_string(), username.to_string());
        params.insert("period".to_string(), period.as_str().to_string());

        self.dispatch(Call::TopTracks, params).await
    }

    async fn dispatch<T: serde::de::DeserializeOwned>(
        &self,
        call: Call,
        params: QueryParams,
    ) -> Result<Response<T>> {
        self.counted(self.api.call_api(call, &params).await)?.decode()
    }
}

fn insert_username(params: &mut QueryParams, username: Option<&str>) {
    if let Some(username) = username {
        params.insert("username".to_string(), username.to_string());
    }
}

impl std::fmt::Debug for LastFmService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastFmService")
            .field("calls", &self.calls.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockLastFmApi;
    use crate::client::MockLastFmClient;
    use crate::test_support::FakeHttpClient;
    use crate::types::ApiErrorCode;
    use serde_json::json;
    use std::io::Cursor;

    fn service(client: MockLastFmClient, api: MockLastFmApi) -> LastFmService {
        service_with_http(client, api, FakeHttpClient::failing())
    }

    fn service_with_http(
        client: MockLastFmClient,
        api: MockLastFmApi,
        http: FakeHttpClient,
    ) -> LastFmService {
        LastFmService::new(Arc::new(client), Arc::new(api), Arc::new(http))
            .with_call_counter(Arc::new(ApiCallCounter::new()))
    }

    fn png_bytes() -> Vec<u8> {
        let image = DynamicImage::ImageRgba8(image::RgbaImage::new(3, 2));
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[tokio::test]
    async fn test_recent_scrobbles_counts_call() {
        let mut client = MockLastFmClient::new();
        client
            .expect_get_recent_scrobbles()
            .withf(|username, count| username == "rj" && *count == DEFAULT_COUNT)
            .times(1)
            .returning(|_, _| {
                Ok(PageResponse {
                    items: vec![Track {
                        name: "Song".to_string(),
                        ..Default::default()
                    }],
                    page: 1,
                    per_page: 2,
                    total_pages: 1,
                    total_items: 1,
                })
            });

        let service = service(client, MockLastFmApi::new());
        let page = service.get_recent_scrobbles("rj", DEFAULT_COUNT).await.unwrap();
        assert_eq!(page.items[0].name, "Song");
        assert_eq!(service.call_counter().get(), 1);
    }

    #[tokio::test]
    async fn test_failed_call_is_still_counted() {
        let mut client = MockLastFmClient::new();
        client
            .expect_get_top_artists()
            .returning(|_, _, _, _| Err(LastFmError::Http("connection reset".to_string())));

        let service = service(client, MockLastFmApi::new());
        let result = service.get_top_artists("rj", StatsTimeSpan::Week, 5).await;
        assert!(matches!(result, Err(LastFmError::Http(_))));
        assert_eq!(service.call_counter().get(), 1);
    }

    #[tokio::test]
    async fn test_user_exists_reads_success_flag() {
        let mut client = MockLastFmClient::new();
        client
            .expect_get_user_info()
            .withf(|username| username == "rj")
            .returning(|_| {
                Ok(Response::success(User {
                    name: "RJ".to_string(),
                    ..Default::default()
                }))
            });
        client
            .expect_get_user_info()
            .withf(|username| username == "nobody")
            .returning(|_| Ok(Response::failure(ApiErrorCode::InvalidParameters, "User not found")));

        let service = service(client, MockLastFmApi::new());
        assert!(service.lastfm_user_exists("rj").await.unwrap());
        assert!(!service.lastfm_user_exists("nobody").await.unwrap());
        assert_eq!(service.call_counter().get(), 2);
    }

    #[tokio::test]
    async fn test_searches_ask_for_one_item() {
        let mut client = MockLastFmClient::new();
        client
            .expect_search_track()
            .withf(|query, per_page| query == "believe" && *per_page == 1)
            .times(1)
            .returning(|_, _| Ok(PageResponse::default()));
        client
            .expect_search_album()
            .withf(|query, per_page| query == "believe" && *per_page == 1)
            .times(1)
            .returning(|_, _| Ok(PageResponse::default()));

        let service = service(client, MockLastFmApi::new());
        assert!(service.search_track("believe").await.unwrap().is_empty());
        assert!(service.search_album("believe").await.unwrap().is_empty());
        assert_eq!(service.call_counter().get(), 2);
    }

    #[tokio::test]
    async fn test_top_albums_asks_for_first_page() {
        let mut client = MockLastFmClient::new();
        client
            .expect_get_top_albums()
            .withf(|username, span, page, count| {
                username == "rj" && *span == StatsTimeSpan::Year && *page == 1 && *count == 9
            })
            .times(1)
            .returning(|_, _, _, _| Ok(PageResponse::default()));

        let service = service(client, MockLastFmApi::new());
        service
            .get_top_albums("rj", StatsTimeSpan::Year, 9)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_track_info_params_and_content() {
        let mut api = MockLastFmApi::new();
        api.expect_call_api()
            .withf(|call, params| {
                *call == Call::TrackInfo
                    && params.get("artist").map(String::as_str) == Some("Cher")
                    && params.get("track").map(String::as_str) == Some("Believe")
                    && params.get("username").map(String::as_str) == Some("rj")
                    && params.get("autocorrect").map(String::as_str) == Some("1")
            })
            .times(1)
            .returning(|_, _| {
                Ok(Response::success(json!({
                    "track": {
                        "name": "Believe",
                        "url": "https://www.last.fm/music/Cher/_/Believe",
                        "duration": "240000",
                        "listeners": "600000",
                        "playcount": "4000000",
                        "artist": {"name": "Cher", "url": "https://www.last.fm/music/Cher"},
                        "userplaycount": "3",
                        "userloved": "1",
                        "toptags": {"tag": [{"name": "pop", "url": "https://www.last.fm/tag/pop"}]}
                    }
                })))
            });

        let service = service(MockLastFmClient::new(), api);
        let track = service
            .get_track_info("Believe", "Cher", Some("rj"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(track.artist.name, "Cher");
        assert_eq!(track.user_playcount, Some(3));
        assert!(track.user_loved);
        assert_eq!(crate::format::top_tags_to_string(&track.top_tags), "pop");
        assert_eq!(service.call_counter().get(), 1);
    }

    #[tokio::test]
    async fn test_unknown_track_is_none() {
        let mut api = MockLastFmApi::new();
        api.expect_call_api()
            .withf(|_, params| !params.contains_key("username"))
            .returning(|_, _| Ok(Response::failure(ApiErrorCode::InvalidParameters, "Track not found")));

        let service = service(MockLastFmClient::new(), api);
        let track = service.get_track_info("Nope", "Nobody", None).await.unwrap();
        assert!(track.is_none());
        assert_eq!(service.call_counter().get(), 1);
    }

    #[tokio::test]
    async fn test_artist_info_failure_is_carried() {
        let mut api = MockLastFmApi::new();
        api.expect_call_api()
            .withf(|call, params| {
                *call == Call::ArtistInfo
                    && params.get("autocorrect").map(String::as_str) == Some("1")
            })
            .returning(|_, _| {
                Ok(Response::failure(
                    ApiErrorCode::InvalidParameters,
                    "The artist you supplied could not be found",
                ))
            });

        let service = service(MockLastFmClient::new(), api);
        let response = service.get_artist_info("Nobody", Some("rj")).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.error, Some(ApiErrorCode::InvalidParameters));
    }

    #[tokio::test]
    async fn test_album_info_has_no_autocorrect() {
        let mut api = MockLastFmApi::new();
        api.expect_call_api()
            .withf(|call, params| {
                *call == Call::AlbumInfo
                    && params.get("album").map(String::as_str) == Some("Believe")
                    && !params.contains_key("autocorrect")
            })
            .returning(|_, _| {
                Ok(Response::success(json!({
                    "album": {
                        "name": "Believe", "artist": "Cher",
                        "tags": {"tag": [{"name": "pop", "url": "https://www.last.fm/tag/pop"}]}
                    }
                })))
            });

        let service = service(MockLastFmClient::new(), api);
        let response = service.get_album_info("Cher", "Believe", None).await.unwrap();
        let album = response.into_content().unwrap().album;
        assert_eq!(
            crate::format::tags_to_linked_string(&album.tags),
            "[pop](https://www.last.fm/tag/pop)"
        );
    }

    #[tokio::test]
    async fn test_top_tracks_sends_period_value() {
        let mut api = MockLastFmApi::new();
        api.expect_call_api()
            .withf(|call, params| {
                *call == Call::TopTracks
                    && params.get("period").map(String::as_str) == Some("6month")
                    && params.get("limit").map(String::as_str) == Some("10")
                    && params.get("user").map(String::as_str) == Some("rj")
                    && !params.contains_key("username")
            })
            .returning(|_, _| {
                Ok(Response::success(json!({
                    "toptracks": {
                        "track": [{"name": "Creep", "artist": {"name": "Radiohead"}, "url": "", "playcount": "5"}],
                        "@attr": {"user": "rj", "page": "1", "perPage": "10", "totalPages": "1", "total": "1"}
                    }
                })))
            });

        let service = service(MockLastFmClient::new(), api);
        let response = service
            .get_top_tracks("rj", CallTimePeriod::Half, 10)
            .await
            .unwrap();
        let top = response.into_content().unwrap().top_tracks;
        assert_eq!(top.track[0].artist, "Radiohead");
        assert_eq!(top.attr.total, 1);
    }

    #[tokio::test]
    async fn test_album_images() {
        let mut client = MockLastFmClient::new();
        client.expect_get_album_info().returning(|_, _| {
            Ok(Response::success(crate::types::AlbumInfo {
                name: "Believe".to_string(),
                artist: "Cher".to_string(),
                images: ImageSet {
                    extra_large: Some("https://img/300x300.png".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            }))
        });

        let service = service(client, MockLastFmApi::new());
        let images = service.get_album_images("Cher", "Believe").await.unwrap();
        assert_eq!(
            images.unwrap().largest(),
            Some("https://img/300x300.png")
        );
        assert_eq!(service.call_counter().get(), 1);
    }

    #[tokio::test]
    async fn test_album_image_loaded() {
        let http = FakeHttpClient::bytes(200, png_bytes());
        let service = service_with_http(MockLastFmClient::new(), MockLastFmApi::new(), http);

        match service.get_album_image("https://img/300x300.png").await {
            AlbumImage::Loaded(image) => {
                assert_eq!((image.width(), image.height()), (3, 2));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(service.call_counter().get(), 0);
    }

    #[tokio::test]
    async fn test_album_image_missing() {
        let http = FakeHttpClient::bytes(404, Vec::new());
        let service = service_with_http(MockLastFmClient::new(), MockLastFmApi::new(), http);

        assert!(matches!(
            service.get_album_image("https://img/gone.png").await,
            AlbumImage::Missing
        ));
        assert!(matches!(service.get_album_image("").await, AlbumImage::Missing));
    }

    #[tokio::test]
    async fn test_album_image_failures() {
        let service = service(MockLastFmClient::new(), MockLastFmApi::new());
        assert!(matches!(
            service.get_album_image("https://img/a.png").await,
            AlbumImage::Failed(LastFmError::Http(_))
        ));
        assert!(matches!(
            service.get_album_image("not a url").await,
            AlbumImage::Failed(LastFmError::Http(_))
        ));

        let http = FakeHttpClient::bytes(200, b"definitely not a png".to_vec());
        let service = service_with_http(MockLastFmClient::new(), MockLastFmApi::new(), http);
        let image = service.get_album_image("https://img/a.png").await;
        assert!(matches!(image, AlbumImage::Failed(LastFmError::Image(_))));
        assert!(image.into_image().is_none());
    }
}
