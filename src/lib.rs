//! Last.fm service layer of the .fmbot Discord bot.
//!
//! [`LastFmService`] is what commands talk to. It forwards to a typed
//! [`LastFmClient`] or to the raw [`LastFmApi`] dispatcher and counts every
//! call it makes. The [`format`] and [`period`] modules turn results and user
//! input into what the bot shows and sends.

pub mod api;
pub mod client;
pub mod config;
pub mod de;
pub mod error;
pub mod format;
pub mod metrics;
pub mod period;
pub mod persistence;
pub mod service;
pub mod types;

#[cfg(test)]
mod test_support;

pub use api::{Call, LastFmApi, LastFmApiImpl, QueryParams};
pub use client::{LastFmClient, LastFmClientImpl};
pub use config::LastFmConfig;
pub use error::LastFmError;
pub use metrics::ApiCallCounter;
pub use period::{CallTimePeriod, ChartTimePeriod, StatsTimeSpan, TimeModel, TimeModelDefaults};
pub use persistence::GuildUser;
pub use service::{AlbumImage, LastFmService, DEFAULT_COUNT};
pub use types::{
    Album, AlbumInfo, AlbumResponse, ApiErrorCode, Artist, ArtistInfo, ArtistResponse, ImageSet,
    PageResponse, Response, Tag, Tags, TopTags, TopTracks, TopTracksResponse, Track, TrackInfo,
    TrackResponse, User,
};

#[cfg(feature = "mock")]
pub use api::MockLastFmApi;
#[cfg(feature = "mock")]
pub use client::MockLastFmClient;

pub type Result<T> = std::result::Result<T, LastFmError>;
