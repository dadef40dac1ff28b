use crate::{LastFmError, Result};
use std::env;

/// Default endpoint of the Last.fm web API.
pub const DEFAULT_API_URL: &str = "https://ws.audioscrobbler.com/2.0/";

const DEFAULT_USER_AGENT: &str = concat!("fmbot-lastfm/", env!("CARGO_PKG_VERSION"));

/// Credentials and endpoint settings for talking to Last.fm.
///
/// # Examples
///
/// ```rust
/// use fmbot_lastfm::LastFmConfig;
///
/// let config = LastFmConfig::new("my-api-key")
///     .with_api_secret("my-secret")
///     .with_user_agent("my-bot/1.0");
///
/// assert_eq!(config.api_key, "my-api-key");
/// assert_eq!(config.api_url, fmbot_lastfm::config::DEFAULT_API_URL);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastFmConfig {
    /// Application API key
    pub api_key: String,
    /// Shared secret; only needed for signed calls, which this crate does not make
    pub api_secret: Option<String>,
    /// Base URL every method call is sent to
    pub api_url: String,
    /// `User-Agent` header sent with every request
    pub user_agent: String,
}

impl LastFmConfig {
    /// Create a config for the given API key with default endpoint settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: None,
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Load the config from `LASTFM_API_KEY`, `LASTFM_API_SECRET` and `LASTFM_API_URL`.
    ///
    /// Only the key is required.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("LASTFM_API_KEY").map_err(|_| {
            LastFmError::Config("LASTFM_API_KEY environment variable not set".to_string())
        })?;
        if api_key.trim().is_empty() {
            return Err(LastFmError::Config(
                "LASTFM_API_KEY environment variable is empty".to_string(),
            ));
        }

        let mut config = Self::new(api_key);
        if let Ok(secret) = env::var("LASTFM_API_SECRET") {
            config = config.with_api_secret(secret);
        }
        if let Ok(url) = env::var("LASTFM_API_URL") {
            config = config.with_api_url(url);
        }
        Ok(config)
    }

    /// Set the shared secret
    pub fn with_api_secret(mut self, secret: impl Into<String>) -> Self {
        self.api_secret = Some(secret.into());
        self
    }

    /// Point the client at a different endpoint (useful for testing)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Set a custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
