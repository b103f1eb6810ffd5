//! Content publishing.
//!
//! Publishes rendered posts to the content repository with content-hash
//! diffing (no redundant commits) and one atomic multi-file commit per
//! invocation. Two concurrent publishes against the same branch cannot
//! clobber each other: the ref update is fast-forward-only, so the loser
//! gets a [`GithubError::RefConflict`](pitwall_github::GithubError) and the
//! branch keeps the winner's commit.

use std::time::Duration;

use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use pitwall_github::{CommitIdentity, GithubClient, TreeEntry};
use pitwall_models::BlogPost;

use crate::batch::{CommitBatch, FileContent};
use crate::error::ContentResult;
use crate::image::fetch_image;

/// Root directory for published posts.
const POSTS_ROOT: &str = "content/posts";

/// Result of a publish invocation.
#[derive(Debug, Clone)]
pub struct PublishOutcome {
    /// Whether a commit was created.
    pub committed: bool,
    /// Paths included in the commit; empty when nothing changed.
    pub paths: Vec<String>,
}

impl PublishOutcome {
    fn no_change() -> Self {
        Self {
            committed: false,
            paths: Vec::new(),
        }
    }
}

/// Publisher for rendered blog content.
pub struct Publisher {
    github: GithubClient,
    http: Client,
    identity: CommitIdentity,
}

impl Publisher {
    /// Create a publisher over a GitHub client and commit identity.
    pub fn new(github: GithubClient, identity: CommitIdentity) -> ContentResult<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .user_agent(concat!("pitwall-content/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            github,
            http,
            identity,
        })
    }

    /// Whether `new_content` differs from what the tracked branch currently
    /// holds at `path`. An absent path counts as changed.
    pub async fn file_changed(&self, path: &str, new_content: &[u8]) -> ContentResult<bool> {
        match self.github.get_file(path).await? {
            Some(existing) => Ok(digest(&existing.content) != digest(new_content)),
            None => Ok(true),
        }
    }

    /// Commit a batch of changed files atomically.
    ///
    /// An empty batch is a successful no-op returning `false` and issuing no
    /// network writes. Otherwise one tree is layered on the branch's current
    /// tree, one commit is created, and the branch ref is advanced
    /// fast-forward-only. A failure at any step leaves the branch unmoved
    /// and surfaces the error.
    pub async fn publish(&self, batch: CommitBatch, message: &str) -> ContentResult<bool> {
        if batch.is_empty() {
            info!("No changes detected, nothing to commit");
            return Ok(false);
        }

        let head = self.github.branch_head().await?;
        let base_tree = self.github.commit_tree(&head).await?;

        let mut entries = Vec::with_capacity(batch.len());
        for file in batch.into_files() {
            match file.content {
                FileContent::Text(text) => entries.push(TreeEntry::text(file.path, text)),
                FileContent::Binary(bytes) => {
                    let sha = self.github.create_blob(&bytes).await?;
                    entries.push(TreeEntry::blob(file.path, sha));
                }
            }
        }

        let tree = self.github.create_tree(&base_tree, entries).await?;
        let commit = self
            .github
            .create_commit(message, &tree, &head, &self.identity)
            .await?;
        self.github.update_branch_head(&commit).await?;

        info!(commit = %commit, "Published content commit");
        Ok(true)
    }

    /// Stage the changed subset of one post's files: the rendered markdown
    /// and its featured image.
    ///
    /// Image policy: a failed image download degrades the staging to
    /// markdown-only rather than failing the post. The markdown is the
    /// higher-value artifact, and the next sync retries the image through
    /// the same diffing.
    pub async fn stage_post(&self, post: &BlogPost, markdown: &str) -> ContentResult<CommitBatch> {
        let mut batch = CommitBatch::new();
        let post_dir = format!("{}/{}", POSTS_ROOT, post.slug());

        let markdown_path = format!("{}/index.md", post_dir);
        if self
            .file_changed(&markdown_path, markdown.as_bytes())
            .await?
        {
            batch.add_text(markdown_path, markdown);
        }

        match fetch_image(&self.http, &post.image_ref).await {
            Ok(image) => {
                let image_path = format!("{}/featured.{}", post_dir, image.ext.as_str());
                if self.file_changed(&image_path, &image.bytes).await? {
                    batch.add_binary(image_path, image.bytes);
                }
            }
            Err(e) => {
                warn!(
                    slug = %post.slug(),
                    error = %e,
                    "Featured image fetch failed, publishing markdown only"
                );
            }
        }

        Ok(batch)
    }

    /// Publish a single post (at most two files).
    pub async fn publish_post(
        &self,
        post: &BlogPost,
        markdown: &str,
    ) -> ContentResult<PublishOutcome> {
        let batch = self.stage_post(post, markdown).await?;
        let paths: Vec<String> = batch.paths().iter().map(|p| p.to_string()).collect();
        let message = format!("ci(ops): publish post `{}`", post.slug());

        if self.publish(batch, &message).await? {
            Ok(PublishOutcome {
                committed: true,
                paths,
            })
        } else {
            Ok(PublishOutcome::no_change())
        }
    }

    /// Publish every changed file across all posts as one commit.
    ///
    /// Change status is computed per file independently; the union of
    /// changed paths forms exactly one batch for the whole sync.
    pub async fn sync_posts(&self, posts: &[(BlogPost, String)]) -> ContentResult<PublishOutcome> {
        let mut batch = CommitBatch::new();
        for (post, markdown) in posts {
            batch.extend(self.stage_post(post, markdown).await?);
        }

        let paths: Vec<String> = batch.paths().iter().map(|p| p.to_string()).collect();
        if self.publish(batch, "ci(ops): sync all blog posts").await? {
            Ok(PublishOutcome {
                committed: true,
                paths,
            })
        } else {
            Ok(PublishOutcome::no_change())
        }
    }
}

/// Content-addressed digest used for change detection.
fn digest(content: &[u8]) -> [u8; 32] {
    Sha256::digest(content).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_differs_on_content_change() {
        assert_eq!(digest(b"same"), digest(b"same"));
        assert_ne!(digest(b"same"), digest(b"different"));
    }
}
