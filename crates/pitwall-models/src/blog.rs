//! Blog post records.
//!
//! Blog posts are owned by the website; this service reads them and renders
//! them into the content repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post as read from the document store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// Document id; URL-safe, used as the published directory slug.
    pub id: String,
    /// Post title.
    pub title: String,
    /// Creation timestamp; its calendar date becomes the frontmatter date.
    pub created_at: DateTime<Utc>,
    /// Author's user document id.
    pub author_id: String,
    /// Markdown body.
    pub content: String,
    /// URL of the featured image.
    pub image_ref: String,
}

impl BlogPost {
    /// Directory of this post under the content repository's posts root.
    pub fn slug(&self) -> &str {
        &self.id
    }
}
