//! Lap-time records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::submission::LapTimeSubmission;
use crate::video::VideoId;

/// A validated lap-time record as stored in the document store.
///
/// Exactly one record exists per proof URL; re-ingesting the same proof
/// overwrites every other field (last write wins). Records are created and
/// updated only by the ingestion pipeline and never deleted by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackTime {
    /// Normalized track name (lowercase, hyphenated).
    pub track: String,
    /// Track configuration, empty-capable upstream so optional here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<String>,
    /// Calendar date of the lap.
    pub date: NaiveDate,
    /// Car name.
    pub car: String,
    /// Free-form tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// Lap time in seconds.
    pub time: f64,
    /// Canonical watch URL of the source video; natural key.
    pub proof: String,
    /// Owning user's document id.
    pub user_id: String,
}

impl TrackTime {
    /// Build a record from a validated submission, the source video, and the
    /// resolved owning user.
    pub fn from_submission(
        submission: LapTimeSubmission,
        video_id: &VideoId,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            track: submission.track,
            configuration: submission.configuration,
            date: submission.date,
            car: submission.car,
            tag: submission.tag,
            time: submission.time_seconds,
            proof: video_id.watch_url(),
            user_id: user_id.into(),
        }
    }
}
