//! YouTube Data API v3 client.
//!
//! Two calls back the ingestion pipeline:
//! - channel search by publish window (`search.list`), capped at 50 results
//! - batch details fetch for full descriptions (`videos.list`)
//!
//! The API key authenticates as a query parameter and is never echoed into
//! errors or logs; failures report the endpoint name only.

pub mod client;
pub mod error;
pub mod types;

pub use client::{YouTubeClient, YouTubeConfig};
pub use error::{YouTubeError, YouTubeResult};
pub use types::{SearchItem, VideoItem};
