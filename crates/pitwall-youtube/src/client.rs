//! YouTube Data API client.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;
use tracing::debug;

use pitwall_models::VideoId;

use crate::error::{YouTubeError, YouTubeResult};
use crate::types::{SearchItem, SearchListResponse, VideoItem, VideoListResponse};

/// Hard cap on search results per invocation.
///
/// The API allows one page of at most 50; the pipeline does not paginate, so
/// uploads beyond the cap inside a window are dropped. Known limitation: the
/// scheduler's window is short enough that a channel never uploads 50 videos
/// inside it.
const MAX_SEARCH_RESULTS: u32 = 50;

/// Timestamp format the API expects for `publishedAfter`.
const PUBLISHED_AFTER_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

// =============================================================================
// Configuration
// =============================================================================

/// YouTube client configuration.
#[derive(Debug, Clone)]
pub struct YouTubeConfig {
    /// API key (query-parameter auth)
    pub api_key: String,
    /// API base URL; override for tests or a proxy
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl YouTubeConfig {
    /// Create config from environment variables.
    pub fn from_env() -> YouTubeResult<Self> {
        let api_key = std::env::var("YOUTUBE_API_KEY")
            .map_err(|_| YouTubeError::Config("YOUTUBE_API_KEY must be set".to_string()))?;

        Ok(Self {
            api_key,
            base_url: std::env::var("YOUTUBE_API_BASE_URL")
                .unwrap_or_else(|_| "https://www.googleapis.com/youtube/v3".to_string()),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        })
    }
}

// =============================================================================
// Client
// =============================================================================

/// YouTube Data API v3 client.
pub struct YouTubeClient {
    http: Client,
    config: YouTubeConfig,
}

impl YouTubeClient {
    /// Create a new client.
    pub fn new(config: YouTubeConfig) -> YouTubeResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(concat!("pitwall-youtube/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(YouTubeError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> YouTubeResult<Self> {
        Self::new(YouTubeConfig::from_env()?)
    }

    /// Search a channel's video uploads published strictly after the given
    /// instant, newest window first, capped at [`MAX_SEARCH_RESULTS`].
    pub async fn search_channel_uploads(
        &self,
        channel_id: &str,
        published_after: DateTime<Utc>,
    ) -> YouTubeResult<Vec<SearchItem>> {
        let url = format!("{}/search", self.config.base_url);
        let published_after = published_after.format(PUBLISHED_AFTER_FORMAT).to_string();
        let max_results = MAX_SEARCH_RESULTS.to_string();

        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("channelId", channel_id),
                ("order", "date"),
                ("type", "video"),
                ("publishedAfter", published_after.as_str()),
                ("maxResults", max_results.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: SearchListResponse = Self::parse_response("search.list", response).await?;
        debug!(
            channel_id = %channel_id,
            published_after = %published_after,
            items = body.items.len(),
            "Channel upload search complete"
        );
        Ok(body.items)
    }

    /// Fetch full snippets (including untruncated descriptions) for a batch
    /// of video ids in a single request.
    pub async fn video_details(&self, ids: &[VideoId]) -> YouTubeResult<Vec<VideoItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/videos", self.config.base_url);
        let joined = ids
            .iter()
            .map(VideoId::as_str)
            .collect::<Vec<_>>()
            .join(",");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("id", joined.as_str()),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let body: VideoListResponse = Self::parse_response("videos.list", response).await?;
        Ok(body.items)
    }

    /// Decode a response, mapping non-success statuses to endpoint-scoped
    /// errors (the URL carries the key and must not leak).
    async fn parse_response<T: serde::de::DeserializeOwned>(
        endpoint: &str,
        response: reqwest::Response,
    ) -> YouTubeResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(YouTubeError::from_status(endpoint, status.as_u16(), body));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            YouTubeError::RequestFailed(
                endpoint.to_string(),
                status.as_u16(),
                format!("invalid response body: {}", e),
            )
        })
    }
}
