//! Content pipeline error types.

use thiserror::Error;

use crate::render::RenderError;

/// Result type for content operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors that can occur while rendering or publishing content.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error(transparent)]
    Github(#[from] pitwall_github::GithubError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Image fetch failed for '{url}': {reason}")]
    ImageFetch { url: String, reason: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ContentError {
    /// True when a failed publish may be retried after re-reading the
    /// branch head (another writer advanced it in between).
    pub fn is_ref_conflict(&self) -> bool {
        matches!(self, Self::Github(e) if e.is_ref_conflict())
    }
}
