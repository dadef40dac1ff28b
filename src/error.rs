use thiserror::Error;

/// Error types for Last.fm operations.
///
/// A call that reaches Last.fm but is rejected (unknown user, missing track,
/// suspended key) is usually *not* an error: it comes back as a
/// [`Response`](crate::Response) whose `success` flag is `false`. The variants
/// here cover the failures that have no such response to carry them.
///
/// # Error Handling Examples
///
/// ```rust,no_run
/// use fmbot_lastfm::{LastFmConfig, LastFmError, LastFmService};
///
/// #[tokio::main]
/// async fn main() {
///     let config = LastFmConfig::new("api-key");
///     let service = LastFmService::from_config(
///         Box::new(http_client::native::NativeClient::new()),
///         config,
///     );
///
///     match service.get_recent_scrobbles("rj", 2).await {
///         Ok(page) => println!("{} scrobbles", page.items.len()),
///         Err(LastFmError::Api { code, message }) => {
///             eprintln!("Last.fm refused the call ({code:?}): {message}")
///         }
///         Err(LastFmError::Http(msg)) => eprintln!("Network error: {msg}"),
///         Err(e) => eprintln!("Other error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum LastFmError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, timeouts, DNS errors, and other
    /// low-level networking issues reported by the HTTP client.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse Last.fm's response.
    ///
    /// Returned when the body is not JSON, or when a successful payload does
    /// not have the shape the caller asked for.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Last.fm answered with an error document on a call that has no
    /// success flag of its own (paged listings).
    #[error("Last.fm API error ({code:?}): {message}")]
    Api {
        /// The numeric error code, decoded
        code: crate::ApiErrorCode,
        /// Human readable message from Last.fm
        message: String,
    },

    /// Missing or invalid configuration, e.g. no API key in the environment.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Downloaded image bytes could not be decoded.
    #[error("Image error: {0}")]
    Image(String),
}

impl From<serde_json::Error> for LastFmError {
    fn from(e: serde_json::Error) -> Self {
        LastFmError::Parse(e.to_string())
    }
}

impl From<image::ImageError> for LastFmError {
    fn from(e: image::ImageError) -> Self {
        LastFmError::Image(e.to_string())
    }
}
