//! GitHub REST API client.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::error::{GithubError, GithubResult};
use crate::types::{
    CommitIdentity, CommitResponse, ContentsResponse, CreateBlobRequest, CreateCommitRequest,
    CreateTreeRequest, CreatedObject, RefResponse, RepoFile, TreeEntry, UpdateRefRequest,
};

const API_VERSION: &str = "2022-11-28";

// =============================================================================
// Configuration
// =============================================================================

/// GitHub client configuration.
#[derive(Debug, Clone)]
pub struct GithubConfig {
    /// Personal access token or installation token
    pub token: String,
    /// Repository owner (user or org)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Tracked branch
    pub branch: String,
    /// API base URL; override for tests or GitHub Enterprise
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl GithubConfig {
    /// Create config from environment variables.
    pub fn from_env() -> GithubResult<Self> {
        let token = std::env::var("GITHUB_TOKEN")
            .map_err(|_| GithubError::Config("GITHUB_TOKEN must be set".to_string()))?;
        let owner = std::env::var("GITHUB_REPO_OWNER")
            .map_err(|_| GithubError::Config("GITHUB_REPO_OWNER must be set".to_string()))?;
        let repo = std::env::var("GITHUB_REPO_NAME")
            .map_err(|_| GithubError::Config("GITHUB_REPO_NAME must be set".to_string()))?;

        Ok(Self {
            token,
            owner,
            repo,
            branch: std::env::var("GITHUB_BRANCH").unwrap_or_else(|_| "main".to_string()),
            base_url: std::env::var("GITHUB_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.github.com".to_string()),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        })
    }
}

// =============================================================================
// Client
// =============================================================================

/// GitHub REST API client scoped to one repository and branch.
pub struct GithubClient {
    http: Client,
    config: GithubConfig,
}

impl GithubClient {
    /// Create a new client.
    pub fn new(config: GithubConfig) -> GithubResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| GithubError::Unauthorized("token contains invalid bytes".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(headers)
            .user_agent(concat!("pitwall-github/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GithubError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> GithubResult<Self> {
        Self::new(GithubConfig::from_env()?)
    }

    /// Tracked branch name.
    pub fn branch(&self) -> &str {
        &self.config.branch
    }

    fn repo_url(&self, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.config.base_url, self.config.owner, self.config.repo, tail
        )
    }

    // =========================================================================
    // Contents
    // =========================================================================

    /// Fetch a file's current state on the tracked branch; `None` when the
    /// path does not exist.
    pub async fn get_file(&self, path: &str) -> GithubResult<Option<RepoFile>> {
        let url = self.repo_url(&format!("contents/{}", path));
        let response = self
            .http
            .get(&url)
            .query(&[("ref", self.config.branch.as_str())])
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => {
                let body: ContentsResponse = response.json().await?;
                if body.encoding != "base64" {
                    return Err(GithubError::Decode(format!(
                        "unexpected encoding '{}' for {}",
                        body.encoding, path
                    )));
                }
                // The API wraps base64 at 60 columns; strip the newlines.
                let packed: String = body
                    .content
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect();
                let content = BASE64
                    .decode(packed)
                    .map_err(|e| GithubError::Decode(format!("{}: {}", path, e)))?;
                Ok(Some(RepoFile {
                    path: path.to_string(),
                    sha: body.sha,
                    content,
                }))
            }
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(Self::error_from_response("contents", status, response).await),
        }
    }

    // =========================================================================
    // Git Data
    // =========================================================================

    /// Current head commit sha of the tracked branch.
    pub async fn branch_head(&self) -> GithubResult<String> {
        let url = self.repo_url(&format!("git/ref/heads/{}", self.config.branch));
        let response = self.http.get(&url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let body: RefResponse = response.json().await?;
                Ok(body.object.sha)
            }
            status => Err(Self::error_from_response("git/ref", status, response).await),
        }
    }

    /// Tree sha of a commit.
    pub async fn commit_tree(&self, commit_sha: &str) -> GithubResult<String> {
        let url = self.repo_url(&format!("git/commits/{}", commit_sha));
        let response = self.http.get(&url).send().await?;

        match response.status() {
            StatusCode::OK => {
                let body: CommitResponse = response.json().await?;
                Ok(body.tree.sha)
            }
            status => Err(Self::error_from_response("git/commits", status, response).await),
        }
    }

    /// Create a blob from raw bytes; returns its sha.
    pub async fn create_blob(&self, content: &[u8]) -> GithubResult<String> {
        let url = self.repo_url("git/blobs");
        let request = CreateBlobRequest {
            content: BASE64.encode(content),
            encoding: "base64".to_string(),
        };
        let response = self.http.post(&url).json(&request).send().await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let body: CreatedObject = response.json().await?;
                Ok(body.sha)
            }
            status => Err(Self::error_from_response("git/blobs", status, response).await),
        }
    }

    /// Create a tree layered on a base tree; returns its sha.
    pub async fn create_tree(
        &self,
        base_tree: &str,
        entries: Vec<TreeEntry>,
    ) -> GithubResult<String> {
        let url = self.repo_url("git/trees");
        let request = CreateTreeRequest {
            base_tree: base_tree.to_string(),
            tree: entries,
        };
        let response = self.http.post(&url).json(&request).send().await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let body: CreatedObject = response.json().await?;
                Ok(body.sha)
            }
            status => Err(Self::error_from_response("git/trees", status, response).await),
        }
    }

    /// Create a commit; returns its sha. The author also signs as committer.
    pub async fn create_commit(
        &self,
        message: &str,
        tree_sha: &str,
        parent_sha: &str,
        identity: &CommitIdentity,
    ) -> GithubResult<String> {
        let url = self.repo_url("git/commits");
        let request = CreateCommitRequest {
            message: message.to_string(),
            tree: tree_sha.to_string(),
            parents: vec![parent_sha.to_string()],
            author: identity.clone(),
            committer: identity.clone(),
        };
        let response = self.http.post(&url).json(&request).send().await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let body: CreatedObject = response.json().await?;
                Ok(body.sha)
            }
            status => Err(Self::error_from_response("git/commits", status, response).await),
        }
    }

    /// Advance the branch ref to a new commit, fast-forward only.
    ///
    /// `force` stays false, so the update succeeds only when the new commit
    /// descends from the current head. Because every commit this client
    /// creates is parented on the head it just read, a rejection means
    /// another writer advanced the branch in between — the compare-and-swap
    /// the publisher relies on. The rejection surfaces as
    /// [`GithubError::RefConflict`] and the branch is left unmoved.
    pub async fn update_branch_head(&self, new_sha: &str) -> GithubResult<()> {
        let url = self.repo_url(&format!("git/refs/heads/{}", self.config.branch));
        let request = UpdateRefRequest {
            sha: new_sha.to_string(),
            force: false,
        };
        let response = self.http.patch(&url).json(&request).send().await?;

        match response.status() {
            StatusCode::OK => {
                debug!(branch = %self.config.branch, sha = %new_sha, "Advanced branch ref");
                Ok(())
            }
            StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                let body = response.text().await.unwrap_or_default();
                Err(GithubError::RefConflict(body))
            }
            status => Err(Self::error_from_response("git/refs", status, response).await),
        }
    }

    async fn error_from_response(
        endpoint: &str,
        status: StatusCode,
        response: reqwest::Response,
    ) -> GithubError {
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GithubError::Unauthorized(body),
            StatusCode::NOT_FOUND => GithubError::NotFound(format!("{}: {}", endpoint, body)),
            _ => GithubError::RequestFailed(endpoint.to_string(), status.as_u16(), body),
        }
    }
}
