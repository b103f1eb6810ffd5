//! YouTube Data API response types.
//!
//! Only the fields the ingestion pipeline reads are modeled.

use serde::Deserialize;

use pitwall_models::VideoId;

/// `search.list` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

/// One search result; `type=video` searches always carry a video id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub id: SearchItemId,
    pub snippet: SearchSnippet,
}

impl SearchItem {
    /// Video id, when the result is a video.
    pub fn video_id(&self) -> Option<VideoId> {
        self.id.video_id.as_deref().map(VideoId::from)
    }

    pub fn title(&self) -> &str {
        &self.snippet.title
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    #[serde(default)]
    pub video_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub title: String,
    #[serde(default)]
    pub published_at: Option<String>,
}

/// `videos.list` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

/// One video with its full snippet (search snippets truncate descriptions).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    pub id: String,
    pub snippet: VideoSnippet,
}

impl VideoItem {
    pub fn video_id(&self) -> VideoId {
        VideoId::from(self.id.as_str())
    }

    pub fn description(&self) -> &str {
        &self.snippet.description
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
}
