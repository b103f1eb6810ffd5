//! API configuration.

use std::time::Duration;

use anyhow::Context;

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Bearer secret the external scheduler presents
    pub cron_secret: String,
    /// Bearer secret for on-demand single-post publishes
    pub api_key: String,
    /// Channel whose uploads are ingested
    pub youtube_channel_id: String,
    /// Trailing window for each ingestion run
    pub ingest_window: Duration,
    /// Max request body size
    pub max_body_size: usize,
    /// Environment (development/production)
    pub environment: String,
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let cron_secret = std::env::var("CRON_SECRET").context("CRON_SECRET must be set")?;
        let api_key = std::env::var("API_KEY").context("API_KEY must be set")?;
        let youtube_channel_id =
            std::env::var("YOUTUBE_CHANNEL_ID").context("YOUTUBE_CHANNEL_ID must be set")?;

        let ingest_window_hours: u64 = std::env::var("INGEST_WINDOW_HOURS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(6);

        Ok(Self {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(8000),
            cron_secret,
            api_key,
            youtube_channel_id,
            ingest_window: Duration::from_secs(ingest_window_hours * 3600),
            max_body_size: std::env::var("MAX_BODY_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        })
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
