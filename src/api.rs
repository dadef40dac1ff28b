use crate::config::LastFmConfig;
use crate::types::{ApiErrorCode, Response};
use crate::{LastFmError, Result};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Query parameters of a method call, sent in key order.
pub type QueryParams = BTreeMap<String, String>;

// =============================================================================
// Call catalogue
// =============================================================================

/// The Last.fm API methods this crate calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    TrackInfo,
    ArtistInfo,
    AlbumInfo,
    TopTracks,
    TopAlbums,
    TopArtists,
    RecentTracks,
    UserInfo,
    TrackSearch,
    AlbumSearch,
}

impl Call {
    /// The `method` parameter value for this call.
    pub fn method(&self) -> &'static str {
        match self {
            Call::TrackInfo => "track.getInfo",
            Call::ArtistInfo => "artist.getInfo",
            Call::AlbumInfo => "album.getInfo",
            Call::TopTracks => "user.getTopTracks",
            Call::TopAlbums => "user.getTopAlbums",
            Call::TopArtists => "user.getTopArtists",
            Call::RecentTracks => "user.getRecentTracks",
            Call::UserInfo => "user.getInfo",
            Call::TrackSearch => "track.search",
            Call::AlbumSearch => "album.search",
        }
    }
}

impl std::fmt::Display for Call {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.method())
    }
}

// =============================================================================
// LastFmApi trait and implementation
// =============================================================================

/// Generic method dispatcher: send a parameter map to a named Last.fm method.
///
/// A call Last.fm rejects comes back as an unsuccessful [`Response`]; only
/// transport and parse failures are `Err`.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait LastFmApi: Send + Sync {
    async fn call_api(&self, call: Call, params: &QueryParams) -> Result<Response<Value>>;
}

/// [`LastFmApi`] over plain HTTP GET requests.
#[derive(Clone)]
pub struct LastFmApiImpl {
    client: Arc<dyn HttpClient + Send + Sync>,
    config: LastFmConfig,
}

impl LastFmApiImpl {
    pub fn new(client: Box<dyn HttpClient + Send + Sync>, config: LastFmConfig) -> Self {
        Self::from_shared(Arc::from(client), config)
    }

    /// Build a dispatcher that shares an HTTP client with other components.
    pub fn from_shared(client: Arc<dyn HttpClient + Send + Sync>, config: LastFmConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &LastFmConfig {
        &self.config
    }

    /// The full request URL for a call, API key and format included.
    pub fn build_url(&self, call: Call, params: &QueryParams) -> Result<Url> {
        let mut url = format!(
            "{}?method={}&api_key={}&format=json",
            self.config.api_url,
            call.method(),
            urlencoding::encode(&self.config.api_key),
        );
        for (key, value) in params {
            url.push('&');
            url.push_str(&urlencoding::encode(key));
            url.push('=');
            url.push_str(&urlencoding::encode(value));
        }
        url.parse::<Url>()
            .map_err(|e| LastFmError::Config(format!("invalid API URL {url}: {e}")))
    }
}

impl std::fmt::Debug for LastFmApiImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastFmApiImpl")
            .field("api_url", &self.config.api_url)
            .finish()
    }
}

#[async_trait]
impl LastFmApi for LastFmApiImpl {
    async fn call_api(&self, call: Call, params: &QueryParams) -> Result<Response<Value>> {
        let url = self.build_url(call, params)?;
        log::debug!("Calling {call} with {} parameters", params.len());

        let mut request = Request::new(Method::Get, url);
        let _ = request.insert_header("User-Agent", self.config.user_agent.as_str());
        let _ = request.insert_header("Accept", "application/json");

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))?;
        let status: u16 = response.status().into();

        let body = response
            .body_string()
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))?;
        log::trace!("{call} responded with status {status}, {} bytes", body.len());

        parse_api_response(status, &body)
    }
}

/// Interpret a Last.fm response body.
///
/// Error documents (`{"error": 6, "message": "..."}`) become failed
/// responses regardless of the HTTP status. Anything else that is not JSON
/// is a parse error, or an HTTP error when the status was not 2xx.
pub fn parse_api_response(status: u16, body: &str) -> Result<Response<Value>> {
    let value: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) if (200..300).contains(&status) => return Err(LastFmError::Parse(e.to_string())),
        Err(_) => return Err(LastFmError::Http(format!("unexpected status {status}"))),
    };

    if let Some(code) = value.get("error").and_then(Value::as_u64) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        log::debug!("Last.fm returned error {code}: {message}");
        let code = u32::try_from(code)
            .map(ApiErrorCode::from)
            .unwrap_or(ApiErrorCode::Unknown(u32::MAX));
        return Ok(Response::failure(code, message));
    }

    if !(200..300).contains(&status) {
        return Err(LastFmError::Http(format!("unexpected status {status}")));
    }

    Ok(Response::success(value))
}
