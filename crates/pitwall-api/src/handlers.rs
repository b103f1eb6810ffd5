//! Trigger and status handlers.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Redirect;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::warn;

use pitwall_content::render_post;
use pitwall_models::{BlogPost, User};

use crate::auth::require_bearer;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Redirect the root to the status endpoint.
pub async fn root() -> Redirect {
    Redirect::to("/status")
}

/// Status response.
#[derive(Serialize)]
pub struct StatusResponse {
    pub msg: String,
    pub version: String,
    pub timestamp: String,
}

/// Liveness endpoint.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        msg: "Status OK, server is running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Ingest trigger response.
#[derive(Serialize)]
pub struct IngestResponse {
    pub msg: String,
    pub videos_found: usize,
    pub upserted: usize,
    pub skipped: usize,
}

/// Scheduled ingest trigger.
///
/// The external scheduler fires this every few hours with the cron secret;
/// the handler pulls uploads from the trailing window and routes them
/// through the ingestion pipeline.
pub async fn ingest_trigger(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<IngestResponse>> {
    require_bearer(&headers, &state.config.cron_secret)?;

    let summary = state.ingestor.ingest(state.config.ingest_window).await?;

    Ok(Json(IngestResponse {
        msg: format!(
            "Job processed successfully with {} item(s).",
            summary.videos_found
        ),
        videos_found: summary.videos_found,
        upserted: summary.upserted,
        skipped: summary.skipped,
    }))
}

/// Publish trigger request body. Absent or empty means "full sync".
#[derive(Debug, Default, Deserialize)]
pub struct PublishRequest {
    #[serde(default)]
    pub blog: Option<String>,
}

/// Publish trigger response.
#[derive(Serialize)]
pub struct PublishResponse {
    pub msg: String,
    pub committed: bool,
    pub files: Vec<String>,
}

/// Publish trigger: a single post when a blog id is given (API key auth),
/// otherwise a full sync of every post (cron secret auth).
pub async fn publish_trigger(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<PublishRequest>>,
) -> ApiResult<Json<PublishResponse>> {
    let request = body.map(|Json(r)| r).unwrap_or_default();

    let outcome = match request.blog {
        Some(blog_id) => {
            require_bearer(&headers, &state.config.api_key)?;
            publish_single(&state, &blog_id).await?
        }
        None => {
            require_bearer(&headers, &state.config.cron_secret)?;
            publish_all(&state).await?
        }
    };

    let msg = if outcome.committed {
        format!("Committed {} changed file(s).", outcome.paths.len())
    } else {
        "No changes detected. Nothing to commit.".to_string()
    };

    Ok(Json(PublishResponse {
        msg,
        committed: outcome.committed,
        files: outcome.paths,
    }))
}

async fn publish_single(
    state: &AppState,
    blog_id: &str,
) -> ApiResult<pitwall_content::PublishOutcome> {
    let post = state
        .blog_posts
        .get(blog_id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("BlogPost with ID {} not found", blog_id)))?;

    let author = state.users.get(&post.author_id).await?;
    let markdown = render_post(&post, |_| author.clone())
        .map_err(|e| ApiError::not_found(e.to_string()))?;

    Ok(state.publisher.publish_post(&post, &markdown).await?)
}

async fn publish_all(state: &AppState) -> ApiResult<pitwall_content::PublishOutcome> {
    let posts = state.blog_posts.list_all().await?;
    let authors = resolve_authors(state, &posts).await?;

    let mut rendered: Vec<(BlogPost, String)> = Vec::with_capacity(posts.len());
    for post in posts {
        // An unresolvable author skips the post and the sync continues;
        // the other posts should not be held back by one bad record.
        match render_post(&post, |author_id| authors.get(author_id).cloned()) {
            Ok(markdown) => rendered.push((post, markdown)),
            Err(e) => warn!(slug = %post.slug(), error = %e, "Skipping post"),
        }
    }

    Ok(state.publisher.sync_posts(&rendered).await?)
}

/// Fetch each distinct author once.
async fn resolve_authors(
    state: &AppState,
    posts: &[BlogPost],
) -> ApiResult<HashMap<String, User>> {
    let mut authors = HashMap::new();
    for post in posts {
        if !authors.contains_key(&post.author_id) {
            if let Some(user) = state.users.get(&post.author_id).await? {
                authors.insert(post.author_id.clone(), user);
            }
        }
    }
    Ok(authors)
}
