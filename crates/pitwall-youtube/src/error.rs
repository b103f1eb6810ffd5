//! YouTube client error types.

use thiserror::Error;

/// Result type for YouTube API operations.
pub type YouTubeResult<T> = Result<T, YouTubeError>;

/// Errors that can occur talking to the YouTube Data API.
///
/// Variants carry the endpoint name, not the request URL: the URL embeds
/// the API key.
#[derive(Debug, Error)]
pub enum YouTubeError {
    #[error("YouTube configuration error: {0}")]
    Config(String),

    #[error("YouTube API key rejected for '{0}'")]
    Forbidden(String),

    #[error("YouTube quota exhausted for '{0}'")]
    QuotaExceeded(String),

    #[error("YouTube request '{0}' failed with status {1}: {2}")]
    RequestFailed(String, u16, String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl YouTubeError {
    /// Map a non-success status to the matching variant.
    pub fn from_status(endpoint: &str, status: u16, body: String) -> Self {
        match status {
            403 if body.contains("quotaExceeded") => Self::QuotaExceeded(endpoint.to_string()),
            401 | 403 => Self::Forbidden(endpoint.to_string()),
            _ => Self::RequestFailed(endpoint.to_string(), status, body),
        }
    }
}
