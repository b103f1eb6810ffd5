//! GitHub REST API types.
//!
//! Only the fields the publisher reads are modeled.

use serde::{Deserialize, Serialize};

/// A file as it exists on the tracked branch.
#[derive(Debug, Clone)]
pub struct RepoFile {
    /// Repository-relative, slash-separated path.
    pub path: String,
    /// Git blob sha of the current content.
    pub sha: String,
    /// Decoded file bytes.
    pub content: Vec<u8>,
}

/// Commit author/committer identity.
#[derive(Debug, Clone, Serialize)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

impl CommitIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// One entry in a tree creation request.
///
/// Text files go inline via `content`; binary files reference a previously
/// created blob via `sha`. Exactly one of the two is set.
#[derive(Debug, Clone, Serialize)]
pub struct TreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl TreeEntry {
    const FILE_MODE: &'static str = "100644";

    /// Inline text entry.
    pub fn text(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: Self::FILE_MODE.to_string(),
            entry_type: "blob".to_string(),
            sha: None,
            content: Some(content.into()),
        }
    }

    /// Entry referencing an already-created blob.
    pub fn blob(path: impl Into<String>, sha: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: Self::FILE_MODE.to_string(),
            entry_type: "blob".to_string(),
            sha: Some(sha.into()),
            content: None,
        }
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub(crate) struct ContentsResponse {
    pub sha: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub encoding: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefResponse {
    pub object: RefObject,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RefObject {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitResponse {
    pub tree: ShaRef,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShaRef {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedObject {
    pub sha: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateBlobRequest {
    pub content: String,
    pub encoding: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateTreeRequest {
    pub base_tree: String,
    pub tree: Vec<TreeEntry>,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateCommitRequest {
    pub message: String,
    pub tree: String,
    pub parents: Vec<String>,
    pub author: CommitIdentity,
    pub committer: CommitIdentity,
}

#[derive(Debug, Serialize)]
pub(crate) struct UpdateRefRequest {
    pub sha: String,
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_entry_serialization_omits_unset_side() {
        let text = serde_json::to_value(TreeEntry::text("a/index.md", "hello")).unwrap();
        assert_eq!(text["content"], "hello");
        assert!(text.get("sha").is_none());

        let blob = serde_json::to_value(TreeEntry::blob("a/featured.jpg", "abc")).unwrap();
        assert_eq!(blob["sha"], "abc");
        assert!(blob.get("content").is_none());
        assert_eq!(blob["type"], "blob");
        assert_eq!(blob["mode"], "100644");
    }
}
