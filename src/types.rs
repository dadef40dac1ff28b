//! Data types for Last.fm responses.
//!
//! This module contains the records returned by the Last.fm API as the bot
//! consumes them: tracks, albums and artists in listings, the detailed
//! `*.getInfo` payloads, user profiles, tags, image sets, and the two
//! envelopes ([`PageResponse`] and [`Response`]) calls come back in.

use crate::de;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ================================================================================================
// IMAGES
// ================================================================================================

/// Artwork URLs in Last.fm's size ladder.
///
/// Sizes Last.fm left empty are `None`. Serializes back to Last.fm's
/// `[{"size": .., "#text": ..}]` list.
///
/// # Examples
///
/// ```rust
/// use fmbot_lastfm::ImageSet;
///
/// let images: ImageSet = serde_json::from_str(r##"[
///     {"size": "small", "#text": "https://lastfm.freetls.fastly.net/i/u/34s/a.png"},
///     {"size": "extralarge", "#text": "https://lastfm.freetls.fastly.net/i/u/300x300/a.png"}
/// ]"##).unwrap();
///
/// assert_eq!(images.largest(), Some("https://lastfm.freetls.fastly.net/i/u/300x300/a.png"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    pub small: Option<String>,
    pub medium: Option<String>,
    pub large: Option<String>,
    pub extra_large: Option<String>,
    pub mega: Option<String>,
}

impl ImageSet {
    /// The biggest image available, if any.
    pub fn largest(&self) -> Option<&str> {
        [
            &self.mega,
            &self.extra_large,
            &self.large,
            &self.medium,
            &self.small,
        ]
        .into_iter()
        .find_map(|url| url.as_deref())
    }

    /// Whether no size has a URL.
    pub fn is_empty(&self) -> bool {
        self.largest().is_none()
    }

    fn api_images(&self) -> Vec<ApiImage> {
        [
            ("small", &self.small),
            ("medium", &self.medium),
            ("large", &self.large),
            ("extralarge", &self.extra_large),
            ("mega", &self.mega),
        ]
        .into_iter()
        .filter_map(|(size, url)| {
            url.as_ref().map(|url| ApiImage {
                size: size.to_string(),
                url: url.clone(),
            })
        })
        .collect()
    }
}

#[derive(Serialize, Deserialize)]
struct ApiImage {
    #[serde(default)]
    size: String,
    #[serde(rename = "#text", default)]
    url: String,
}

impl FromIterator<ApiImage> for ImageSet {
    fn from_iter<I: IntoIterator<Item = ApiImage>>(iter: I) -> Self {
        let mut set = ImageSet::default();
        for image in iter {
            if image.url.is_empty() {
                continue;
            }
            let slot = match image.size.as_str() {
                "small" => &mut set.small,
                "medium" => &mut set.medium,
                "large" => &mut set.large,
                "extralarge" => &mut set.extra_large,
                "mega" => &mut set.mega,
                _ => continue,
            };
            *slot = Some(image.url);
        }
        set
    }
}

impl Serialize for ImageSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.api_images().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ImageSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let images: Vec<ApiImage> = de::one_or_many(deserializer)?;
        Ok(images.into_iter().collect())
    }
}

// ================================================================================================
// TRACKS, ALBUMS, ARTISTS
// ================================================================================================

/// A track as it appears in listings: recent scrobbles, top tracks, search
/// results and album track lists.
///
/// Only the fields a given listing carries are populated; the rest are left
/// at their defaults. Serializes to the recent-tracks shape it is read from.
///
/// # Examples
///
/// ```rust
/// use fmbot_lastfm::Track;
///
/// let track = Track {
///     name: "Paranoid Android".to_string(),
///     artist: "Radiohead".to_string(),
///     album: Some("OK Computer".to_string()),
///     url: "https://www.last.fm/music/Radiohead/_/Paranoid+Android".to_string(),
///     ..Default::default()
/// };
///
/// assert_eq!(format!("{track}"), "Radiohead - Paranoid Android [OK Computer]");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ApiTrack", into = "ApiTrack")]
pub struct Track {
    /// The track name/title
    pub name: String,
    /// The artist name
    pub artist: String,
    /// The album name, when the listing includes one
    pub album: Option<String>,
    /// Last.fm page of the track
    pub url: String,
    /// MusicBrainz identifier, when known
    pub mbid: Option<String>,
    /// Number of plays (top tracks) or listeners (search results)
    pub playcount: Option<u64>,
    /// Position in a chart or album track list
    pub rank: Option<u64>,
    /// Unix timestamp of the scrobble (recent tracks only)
    pub timestamp: Option<u64>,
    /// Whether this is the track the user is listening to right now
    pub now_playing: bool,
    /// Artwork
    pub images: ImageSet,
}

impl Track {
    /// Convert the scrobble timestamp to a datetime.
    pub fn scrobbled_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .and_then(|ts| DateTime::from_timestamp(ts as i64, 0))
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.album {
            Some(album) => write!(f, "{} - {} [{}]", self.artist, self.name, album),
            None => write!(f, "{} - {}", self.artist, self.name),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ApiTrack {
    #[serde(deserialize_with = "de::text")]
    name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_text"
    )]
    artist: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_text"
    )]
    album: Option<String>,
    #[serde(default)]
    url: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_string"
    )]
    mbid: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_number"
    )]
    playcount: Option<u64>,
    #[serde(default, skip_serializing, deserialize_with = "de::opt_number")]
    listeners: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    date: Option<ApiDate>,
    #[serde(rename = "@attr", default, skip_serializing_if = "Option::is_none")]
    attr: Option<ApiListingAttr>,
    #[serde(default)]
    image: ImageSet,
}

#[derive(Serialize, Deserialize)]
struct ApiDate {
    #[serde(deserialize_with = "de::number")]
    uts: u64,
}

#[derive(Serialize, Deserialize)]
struct ApiListingAttr {
    #[serde(
        default,
        skip_serializing_if = "std::ops::Not::not",
        deserialize_with = "de::flag"
    )]
    nowplaying: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_number"
    )]
    rank: Option<u64>,
}

impl ApiListingAttr {
    fn new(nowplaying: bool, rank: Option<u64>) -> Option<Self> {
        (nowplaying || rank.is_some()).then_some(ApiListingAttr { nowplaying, rank })
    }
}

fn non_empty(s: String) -> Option<String> {
    Some(s).filter(|s| !s.is_empty())
}

impl From<ApiTrack> for Track {
    fn from(t: ApiTrack) -> Self {
        let (now_playing, rank) = t
            .attr
            .map(|attr| (attr.nowplaying, attr.rank))
            .unwrap_or((false, None));
        Track {
            name: t.name,
            artist: t.artist.unwrap_or_default(),
            album: t.album,
            url: t.url,
            mbid: t.mbid,
            playcount: t.playcount.or(t.listeners),
            rank,
            timestamp: t.date.map(|d| d.uts),
            now_playing,
            images: t.image,
        }
    }
}

impl From<Track> for ApiTrack {
    fn from(t: Track) -> Self {
        ApiTrack {
            name: t.name,
            artist: non_empty(t.artist),
            album: t.album,
            url: t.url,
            mbid: t.mbid,
            playcount: t.playcount,
            listeners: None,
            date: t.timestamp.map(|uts| ApiDate { uts }),
            attr: ApiListingAttr::new(t.now_playing, t.rank),
            image: t.images,
        }
    }
}

/// An album as it appears in listings: top albums and search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ApiAlbum", into = "ApiAlbum")]
pub struct Album {
    /// The album name/title
    pub name: String,
    /// The album artist
    pub artist: String,
    /// Last.fm page of the album
    pub url: String,
    /// MusicBrainz identifier, when known
    pub mbid: Option<String>,
    /// Number of plays, for charts
    pub playcount: Option<u64>,
    /// Chart position
    pub rank: Option<u64>,
    /// Cover art
    pub images: ImageSet,
}

impl std::fmt::Display for Album {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.artist, self.name)
    }
}

#[derive(Serialize, Deserialize)]
struct ApiAlbum {
    #[serde(deserialize_with = "de::text")]
    name: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_text"
    )]
    artist: Option<String>,
    #[serde(default)]
    url: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_string"
    )]
    mbid: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_number"
    )]
    playcount: Option<u64>,
    #[serde(rename = "@attr", default, skip_serializing_if = "Option::is_none")]
    attr: Option<ApiListingAttr>,
    #[serde(default)]
    image: ImageSet,
}

impl From<ApiAlbum> for Album {
    fn from(a: ApiAlbum) -> Self {
        Album {
            name: a.name,
            artist: a.artist.unwrap_or_default(),
            url: a.url,
            mbid: a.mbid,
            playcount: a.playcount,
            rank: a.attr.and_then(|attr| attr.rank),
            images: a.image,
        }
    }
}

impl From<Album> for ApiAlbum {
    fn from(a: Album) -> Self {
        ApiAlbum {
            name: a.name,
            artist: non_empty(a.artist),
            url: a.url,
            mbid: a.mbid,
            playcount: a.playcount,
            attr: ApiListingAttr::new(false, a.rank),
            image: a.images,
        }
    }
}

/// An artist as it appears in listings: top artists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ApiArtist", into = "ApiArtist")]
pub struct Artist {
    pub name: String,
    pub url: String,
    pub mbid: Option<String>,
    pub playcount: Option<u64>,
    pub rank: Option<u64>,
    pub images: ImageSet,
}

impl std::fmt::Display for Artist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Serialize, Deserialize)]
struct ApiArtist {
    #[serde(deserialize_with = "de::text")]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_string"
    )]
    mbid: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::opt_number"
    )]
    playcount: Option<u64>,
    #[serde(rename = "@attr", default, skip_serializing_if = "Option::is_none")]
    attr: Option<ApiListingAttr>,
    #[serde(default)]
    image: ImageSet,
}

impl From<ApiArtist> for Artist {
    fn from(a: ApiArtist) -> Self {
        Artist {
            name: a.name,
            url: a.url,
            mbid: a.mbid,
            playcount: a.playcount,
            rank: a.attr.and_then(|attr| attr.rank),
            images: a.image,
        }
    }
}

impl From<Artist> for ApiArtist {
    fn from(a: Artist) -> Self {
        ApiArtist {
            name: a.name,
            url: a.url,
            mbid: a.mbid,
            playcount: a.playcount,
            attr: ApiListingAttr::new(false, a.rank),
            image: a.images,
        }
    }
}

// ================================================================================================
// TAGS
// ================================================================================================

/// A user-applied tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub url: String,
    /// Weight of the tag, only present in top tag listings
    #[serde(default, deserialize_with = "de::opt_number")]
    pub count: Option<u64>,
}

/// The `tags` block of artist and album info.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    #[serde(default, deserialize_with = "de::one_or_many")]
    pub tag: Vec<Tag>,
}

/// The `toptags` block of track info.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTags {
    #[serde(default, deserialize_with = "de::one_or_many")]
    pub tag: Vec<Tag>,
}

// ================================================================================================
// USERS
// ================================================================================================

/// A Last.fm user profile, from `user.getInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default, rename = "realname", deserialize_with = "de::opt_string")]
    pub real_name: Option<String>,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub country: Option<String>,
    /// Total scrobbles
    #[serde(default, deserialize_with = "de::number")]
    pub playcount: u64,
    /// Whether the user has a Last.fm Pro subscription
    #[serde(default, deserialize_with = "de::flag")]
    pub subscriber: bool,
    /// Account type (`user`, `subscriber`, `staff`, `alum`, ...)
    #[serde(default, rename = "type")]
    pub user_type: String,
    #[serde(default)]
    pub registered: Option<Registered>,
    #[serde(default, rename = "image")]
    pub images: ImageSet,
}

/// Registration time of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registered {
    #[serde(deserialize_with = "de::number")]
    pub unixtime: u64,
}

impl User {
    /// When the account was created.
    pub fn registered_at(&self) -> Option<DateTime<Utc>> {
        self.registered
            .as_ref()
            .and_then(|r| DateTime::from_timestamp(r.unixtime as i64, 0))
    }
}

/// Envelope of `user.getInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
}

// ================================================================================================
// DETAILED INFO PAYLOADS
// ================================================================================================

/// Wiki text attached to tracks and albums (and the artist bio).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wiki {
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub content: String,
}

/// A named reference to an artist inside another payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    #[serde(deserialize_with = "de::text")]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub mbid: Option<String>,
}

/// The album block of track info.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub artist: String,
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, rename = "image")]
    pub images: ImageSet,
}

/// Track details from `track.getInfo`.
///
/// `user_playcount` and `user_loved` are only filled when the call was
/// scoped to a username.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub mbid: Option<String>,
    /// Length in milliseconds; Last.fm sends `0` when unknown
    #[serde(default, deserialize_with = "de::opt_number")]
    pub duration: Option<u64>,
    #[serde(default, deserialize_with = "de::number")]
    pub listeners: u64,
    #[serde(default, deserialize_with = "de::number")]
    pub playcount: u64,
    pub artist: ArtistRef,
    #[serde(default)]
    pub album: Option<TrackAlbum>,
    #[serde(default, rename = "userplaycount", deserialize_with = "de::opt_number")]
    pub user_playcount: Option<u64>,
    #[serde(default, rename = "userloved", deserialize_with = "de::flag")]
    pub user_loved: bool,
    #[serde(default, rename = "toptags", deserialize_with = "de::object_or_default")]
    pub top_tags: TopTags,
    #[serde(default)]
    pub wiki: Option<Wiki>,
}

/// Envelope of `track.getInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackResponse {
    pub track: TrackInfo,
}

/// Listener statistics of an artist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistStats {
    #[serde(default, deserialize_with = "de::number")]
    pub listeners: u64,
    #[serde(default, deserialize_with = "de::number")]
    pub playcount: u64,
    #[serde(default, rename = "userplaycount", deserialize_with = "de::opt_number")]
    pub user_playcount: Option<u64>,
}

/// Artist details from `artist.getInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistInfo {
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub mbid: Option<String>,
    #[serde(default, rename = "image")]
    pub images: ImageSet,
    #[serde(default, deserialize_with = "de::object_or_default")]
    pub stats: ArtistStats,
    #[serde(default, deserialize_with = "de::object_or_default")]
    pub tags: Tags,
    #[serde(default)]
    pub bio: Option<Wiki>,
}

/// Envelope of `artist.getInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistResponse {
    pub artist: ArtistInfo,
}

/// The track list of an album.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumTracks {
    #[serde(default, deserialize_with = "de::one_or_many")]
    pub track: Vec<Track>,
}

/// Album details from `album.getInfo`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumInfo {
    pub name: String,
    #[serde(deserialize_with = "de::text")]
    pub artist: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub mbid: Option<String>,
    #[serde(default, rename = "image")]
    pub images: ImageSet,
    #[serde(default, deserialize_with = "de::number")]
    pub listeners: u64,
    #[serde(default, deserialize_with = "de::number")]
    pub playcount: u64,
    #[serde(default, rename = "userplaycount", deserialize_with = "de::opt_number")]
    pub user_playcount: Option<u64>,
    #[serde(default, deserialize_with = "de::object_or_default")]
    pub tags: Tags,
    #[serde(default, deserialize_with = "de::object_or_default")]
    pub tracks: AlbumTracks,
    #[serde(default)]
    pub wiki: Option<Wiki>,
}

/// Envelope of `album.getInfo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumResponse {
    pub album: AlbumInfo,
}

/// The body of `user.getTopTracks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTracks {
    #[serde(default, deserialize_with = "de::one_or_many")]
    pub track: Vec<Track>,
    #[serde(rename = "@attr", default)]
    pub attr: PageAttr,
}

/// Envelope of `user.getTopTracks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTracksResponse {
    #[serde(rename = "toptracks")]
    pub top_tracks: TopTracks,
}

// ================================================================================================
// ENVELOPES
// ================================================================================================

/// Pagination attributes of user chart and history listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageAttr {
    #[serde(default)]
    pub user: String,
    #[serde(default, deserialize_with = "de::number")]
    pub page: u64,
    #[serde(default, rename = "perPage", deserialize_with = "de::number")]
    pub per_page: u64,
    #[serde(default, rename = "totalPages", deserialize_with = "de::number")]
    pub total_pages: u64,
    #[serde(default, deserialize_with = "de::number")]
    pub total: u64,
}

/// One page of a paginated listing.
///
/// # Examples
///
/// ```rust
/// use fmbot_lastfm::{PageResponse, Track};
///
/// let page = PageResponse {
///     items: vec![Track { name: "Song".to_string(), ..Default::default() }],
///     page: 1,
///     per_page: 1,
///     total_pages: 20,
///     total_items: 20,
/// };
///
/// assert!(page.has_next_page());
/// assert_eq!(page.first().map(|t| t.name.as_str()), Some("Song"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    /// Current page number (1-indexed)
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
}

impl<T> PageResponse<T> {
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub(crate) fn from_attr(items: Vec<T>, attr: &PageAttr) -> Self {
        PageResponse {
            items,
            page: attr.page as u32,
            per_page: attr.per_page as u32,
            total_pages: attr.total_pages as u32,
            total_items: attr.total,
        }
    }
}

/// Numeric error codes returned by the Last.fm API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiErrorCode {
    InvalidService,
    InvalidMethod,
    AuthenticationFailed,
    InvalidFormat,
    /// Also what Last.fm returns for unknown users, artists and tracks
    InvalidParameters,
    InvalidResource,
    OperationFailed,
    InvalidSessionKey,
    InvalidApiKey,
    ServiceOffline,
    InvalidMethodSignature,
    TemporaryError,
    SuspendedApiKey,
    RateLimitExceeded,
    Unknown(u32),
}

impl From<u32> for ApiErrorCode {
    fn from(code: u32) -> Self {
        match code {
            2 => ApiErrorCode::InvalidService,
            3 => ApiErrorCode::InvalidMethod,
            4 => ApiErrorCode::AuthenticationFailed,
            5 => ApiErrorCode::InvalidFormat,
            6 => ApiErrorCode::InvalidParameters,
            7 => ApiErrorCode::InvalidResource,
            8 => ApiErrorCode::OperationFailed,
            9 => ApiErrorCode::InvalidSessionKey,
            10 => ApiErrorCode::InvalidApiKey,
            11 => ApiErrorCode::ServiceOffline,
            13 => ApiErrorCode::InvalidMethodSignature,
            16 => ApiErrorCode::TemporaryError,
            26 => ApiErrorCode::SuspendedApiKey,
            29 => ApiErrorCode::RateLimitExceeded,
            other => ApiErrorCode::Unknown(other),
        }
    }
}

/// The outcome of a call whose failure the caller is expected to check.
///
/// # Examples
///
/// ```rust
/// use fmbot_lastfm::{ApiErrorCode, Response};
///
/// let ok = Response::success(42);
/// assert!(ok.success);
/// assert_eq!(ok.content, Some(42));
///
/// let failed: Response<u32> = Response::failure(ApiErrorCode::InvalidParameters, "User not found");
/// assert!(!failed.success);
/// assert_eq!(failed.message.as_deref(), Some("User not found"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response<T> {
    /// Whether Last.fm accepted the call
    pub success: bool,
    /// Error code, for failed calls
    pub error: Option<ApiErrorCode>,
    /// Error message, for failed calls
    pub message: Option<String>,
    /// Payload, for successful calls
    pub content: Option<T>,
}

impl<T> Response<T> {
    pub fn success(content: T) -> Self {
        Response {
            success: true,
            error: None,
            message: None,
            content: Some(content),
        }
    }

    pub fn failure(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Response {
            success: false,
            error: Some(code),
            message: Some(message.into()),
            content: None,
        }
    }

    /// The payload, if the call succeeded.
    pub fn into_content(self) -> Option<T> {
        if self.success {
            self.content
        } else {
            None
        }
    }

    /// Transform the payload, keeping the outcome.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            success: self.success,
            error: self.error,
            message: self.message,
            content: self.content.map(f),
        }
    }

    /// Turn a failed response into [`LastFmError::Api`](crate::LastFmError::Api).
    pub fn into_result(self) -> crate::Result<T> {
        match (self.success, self.content) {
            (true, Some(content)) => Ok(content),
            (_, _) => Err(crate::LastFmError::Api {
                code: self.error.unwrap_or(ApiErrorCode::Unknown(0)),
                message: self.message.unwrap_or_default(),
            }),
        }
    }
}

impl Response<serde_json::Value> {
    /// Deserialize a successful raw payload into `T`.
    ///
    /// Failed responses are passed through with their error intact.
    pub fn decode<T: serde::de::DeserializeOwned>(self) -> crate::Result<Response<T>> {
        let content = match self.content {
            Some(value) if self.success => Some(serde_json::from_value(value)?),
            _ => None,
        };
        Ok(Response {
            success: self.success,
            error: self.error,
            message: self.message,
            content,
        })
    }
}

// ================================================================================================
// TESTS
// ================================================================================================
