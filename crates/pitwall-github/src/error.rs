//! GitHub client error types.

use thiserror::Error;

/// Result type for GitHub operations.
pub type GithubResult<T> = Result<T, GithubError>;

/// Errors that can occur talking to the GitHub API.
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("GitHub configuration error: {0}")]
    Config(String),

    #[error("GitHub authentication failed: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The branch head moved between read and update. Retryable: re-reading
    /// the head and rebuilding the commit will succeed once the other
    /// writer finishes.
    #[error("Branch ref update rejected (head moved): {0}")]
    RefConflict(String),

    #[error("GitHub request '{0}' failed with status {1}: {2}")]
    RequestFailed(String, u16, String),

    #[error("Invalid content encoding: {0}")]
    Decode(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl GithubError {
    /// True when the operation failed because another writer advanced the
    /// branch; callers may retry from the top.
    pub fn is_ref_conflict(&self) -> bool {
        matches!(self, Self::RefConflict(_))
    }
}
