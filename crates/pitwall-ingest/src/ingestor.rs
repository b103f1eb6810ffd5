//! The ingestion pipeline.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, warn};

use pitwall_firestore::{FirestoreClient, TrackTimeRepository, UserRepository};
use pitwall_models::{
    extract_metadata, LapTimeSubmission, TrackTime, VideoCategory, VideoId,
};
use pitwall_youtube::{SearchItem, YouTubeClient};

use crate::error::IngestResult;

/// Counts reported back to the trigger caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Uploads returned by the catalog search (capped at 50 per invocation).
    pub videos_found: usize,
    /// Lap-time records created or overwritten.
    pub upserted: usize,
    /// Lap-time uploads skipped for a logged, per-item reason.
    pub skipped: usize,
}

/// Orchestrates one ingestion run.
pub struct Ingestor {
    youtube: Arc<YouTubeClient>,
    track_times: TrackTimeRepository,
    users: UserRepository,
    channel_id: String,
}

impl Ingestor {
    pub fn new(
        youtube: Arc<YouTubeClient>,
        firestore: Arc<FirestoreClient>,
        channel_id: impl Into<String>,
    ) -> Self {
        Self {
            youtube,
            track_times: TrackTimeRepository::new(Arc::clone(&firestore)),
            users: UserRepository::new(firestore),
            channel_id: channel_id.into(),
        }
    }

    /// Ingest uploads published within the trailing `window`.
    ///
    /// Processing is sequential and bounded by the catalog's 50-result cap;
    /// one malformed upload is skipped with a logged reason while the rest
    /// of the batch continues.
    pub async fn ingest(&self, window: Duration) -> IngestResult<IngestSummary> {
        let published_after = Utc::now() - chrono::Duration::seconds(window.as_secs() as i64);
        let items = self
            .youtube
            .search_channel_uploads(&self.channel_id, published_after)
            .await?;

        let mut summary = IngestSummary {
            videos_found: items.len(),
            ..Default::default()
        };

        for (category, uploads) in group_by_category(items) {
            match category {
                VideoCategory::TimeAttack => {
                    let (upserted, skipped) = self.process_time_attack(&uploads).await?;
                    summary.upserted += upserted;
                    summary.skipped += skipped;
                }
                VideoCategory::RawFootage => {
                    self.process_raw_footage(&uploads);
                }
                VideoCategory::Other(label) => {
                    debug!(
                        category = %label,
                        uploads = uploads.len(),
                        "Unrecognized category, skipping"
                    );
                }
            }
        }

        info!(
            videos_found = summary.videos_found,
            upserted = summary.upserted,
            skipped = summary.skipped,
            "Ingestion run complete"
        );
        Ok(summary)
    }

    /// Process lap-time uploads: one batch details fetch, then each item
    /// independently. Returns `(upserted, skipped)`.
    async fn process_time_attack(&self, uploads: &[SearchItem]) -> IngestResult<(usize, usize)> {
        let ids: Vec<VideoId> = uploads.iter().filter_map(SearchItem::video_id).collect();
        let details = self.youtube.video_details(&ids).await?;

        let mut upserted = 0;
        let mut skipped = 0;

        for video in &details {
            let video_id = video.video_id();

            let metadata = extract_metadata(video.description());
            if metadata.is_empty() {
                info!(video_id = %video_id, "Skipped upload: no metadata block found");
                skipped += 1;
                continue;
            }

            let submission = match LapTimeSubmission::from_metadata(&metadata) {
                Ok(submission) => submission,
                Err(e) => {
                    warn!(video_id = %video_id, error = %e, "Skipped upload: invalid metadata");
                    skipped += 1;
                    continue;
                }
            };

            // A store failure is an upstream error and aborts the run; an
            // unknown driver only skips this item.
            let user = match self.users.find_by_email(&submission.driver_email).await? {
                Some(user) => user,
                None => {
                    warn!(
                        video_id = %video_id,
                        driver = %submission.driver_email,
                        "Skipped upload: no user for driver email"
                    );
                    skipped += 1;
                    continue;
                }
            };

            let record = TrackTime::from_submission(submission, &video_id, user.id);
            self.track_times.upsert(&video_id, &record).await?;
            upserted += 1;
        }

        Ok((upserted, skipped))
    }

    /// Reserved extension point. Raw footage uploads are recognized so the
    /// category never falls into the unrecognized branch, but processing is
    /// intentionally a no-op.
    fn process_raw_footage(&self, uploads: &[SearchItem]) {
        debug!(uploads = uploads.len(), "Raw footage recognized; no processing configured");
    }
}

/// Group search results by title-derived category.
fn group_by_category(items: Vec<SearchItem>) -> HashMap<VideoCategory, Vec<SearchItem>> {
    let mut groups: HashMap<VideoCategory, Vec<SearchItem>> = HashMap::new();
    for item in items {
        groups
            .entry(VideoCategory::from_title(item.title()))
            .or_default()
            .push(item);
    }
    groups
}
