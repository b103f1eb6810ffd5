//! Application state.
//!
//! Every upstream client is constructed once at process start and shared by
//! reference for the life of the process; handlers never build clients.

use std::sync::Arc;

use pitwall_content::Publisher;
use pitwall_firestore::{BlogPostRepository, FirestoreClient, UserRepository};
use pitwall_github::{CommitIdentity, GithubClient};
use pitwall_ingest::Ingestor;
use pitwall_youtube::YouTubeClient;

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub ingestor: Arc<Ingestor>,
    pub publisher: Arc<Publisher>,
    pub blog_posts: Arc<BlogPostRepository>,
    pub users: Arc<UserRepository>,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let firestore = Arc::new(FirestoreClient::from_env()?);
        let youtube = Arc::new(YouTubeClient::from_env()?);
        let github = GithubClient::from_env()?;

        let identity = CommitIdentity::new(
            std::env::var("CONTENT_COMMIT_NAME")
                .unwrap_or_else(|_| "Pitwall Service Account [Bot]".to_string()),
            std::env::var("CONTENT_COMMIT_EMAIL")
                .unwrap_or_else(|_| "bot@pitwall.racing".to_string()),
        );

        let ingestor = Ingestor::new(
            youtube,
            Arc::clone(&firestore),
            config.youtube_channel_id.clone(),
        );
        let publisher = Publisher::new(github, identity)?;

        Ok(Self {
            config,
            ingestor: Arc::new(ingestor),
            publisher: Arc::new(publisher),
            blog_posts: Arc::new(BlogPostRepository::new(Arc::clone(&firestore))),
            users: Arc::new(UserRepository::new(firestore)),
        })
    }
}
