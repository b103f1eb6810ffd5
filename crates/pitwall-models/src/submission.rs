//! Typed validation of lap-time metadata.
//!
//! Converts the raw key/value map extracted from a description into a fully
//! validated submission in a single step, so the per-item skip-and-continue
//! policy in the ingestion pipeline stays testable in isolation.

use std::collections::HashMap;

use chrono::NaiveDate;
use validator::ValidateEmail;

use crate::laptime::{parse_lap_time, LapTimeError};

/// Date format uploaders use in the metadata block.
const DATE_FORMAT: &str = "%m/%d/%Y";

/// A validated lap-time submission, ready to be resolved against a user and
/// upserted as a [`TrackTime`](crate::TrackTime) record.
#[derive(Debug, Clone, PartialEq)]
pub struct LapTimeSubmission {
    /// Track name, normalized: trimmed, lowercased, spaces replaced with hyphens.
    pub track: String,
    /// Optional track configuration (e.g. "CW13").
    pub configuration: Option<String>,
    /// Calendar date of the lap.
    pub date: NaiveDate,
    /// Car name, as written.
    pub car: String,
    /// Optional free-form tag (e.g. a car revision).
    pub tag: Option<String>,
    /// Lap time in seconds.
    pub time_seconds: f64,
    /// Driver email, lowercased, used to resolve the owning user.
    pub driver_email: String,
}

impl LapTimeSubmission {
    /// Validate a metadata map into a submission.
    ///
    /// Required keys: `track`, `date` (`MM/DD/YYYY`), `car`, `time`,
    /// `driver`. Optional: `configuration`, `tag` (empty values are
    /// dropped). The error names the failing field so skipped items can be
    /// diagnosed from logs.
    pub fn from_metadata(
        metadata: &HashMap<String, String>,
    ) -> Result<Self, SubmissionError> {
        let track = required(metadata, "track")?
            .to_lowercase()
            .replace(' ', "-");
        let date_raw = required(metadata, "date")?;
        let date = NaiveDate::parse_from_str(&date_raw, DATE_FORMAT)
            .map_err(|_| SubmissionError::InvalidDate(date_raw))?;
        let car = required(metadata, "car")?;
        let time_seconds = parse_lap_time(&required(metadata, "time")?)?;

        let driver_email = required(metadata, "driver")?.to_lowercase();
        if !driver_email.validate_email() {
            return Err(SubmissionError::InvalidDriverEmail(driver_email));
        }

        Ok(Self {
            track,
            configuration: optional(metadata, "configuration"),
            date,
            car,
            tag: optional(metadata, "tag"),
            time_seconds,
            driver_email,
        })
    }
}

fn required(
    metadata: &HashMap<String, String>,
    field: &'static str,
) -> Result<String, SubmissionError> {
    match metadata.get(field).map(|v| v.trim()) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(SubmissionError::MissingField(field)),
    }
}

fn optional(metadata: &HashMap<String, String>, field: &str) -> Option<String> {
    metadata
        .get(field)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Why a metadata map failed to validate as a lap-time submission.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid date '{0}', expected MM/DD/YYYY")]
    InvalidDate(String),

    #[error("Invalid lap time: {0}")]
    InvalidLapTime(#[from] LapTimeError),

    #[error("Invalid driver email '{0}'")]
    InvalidDriverEmail(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid() -> HashMap<String, String> {
        metadata(&[
            ("track", "Buttonwillow"),
            ("configuration", "CW13"),
            ("date", "06/03/2025"),
            ("car", "Hyperion"),
            ("tag", "v3"),
            ("time", "1:12.123"),
            ("driver", "Driver@Example.com"),
        ])
    }

    #[test]
    fn test_valid_submission() {
        let sub = LapTimeSubmission::from_metadata(&valid()).unwrap();
        assert_eq!(sub.track, "buttonwillow");
        assert_eq!(sub.configuration.as_deref(), Some("CW13"));
        assert_eq!(sub.date, NaiveDate::from_ymd_opt(2025, 6, 3).unwrap());
        assert_eq!(sub.car, "Hyperion");
        assert_eq!(sub.tag.as_deref(), Some("v3"));
        assert_eq!(sub.time_seconds, 72.123);
        assert_eq!(sub.driver_email, "driver@example.com");
    }

    #[test]
    fn test_track_spaces_become_hyphens() {
        let mut meta = valid();
        meta.insert("track".into(), "Laguna Seca".into());
        let sub = LapTimeSubmission::from_metadata(&meta).unwrap();
        assert_eq!(sub.track, "laguna-seca");
    }

    #[test]
    fn test_optional_fields_default_to_none() {
        let mut meta = valid();
        meta.remove("configuration");
        meta.insert("tag".into(), "  ".into());
        let sub = LapTimeSubmission::from_metadata(&meta).unwrap();
        assert_eq!(sub.configuration, None);
        assert_eq!(sub.tag, None);
    }

    #[test]
    fn test_missing_required_field_named() {
        let mut meta = valid();
        meta.remove("car");
        assert_eq!(
            LapTimeSubmission::from_metadata(&meta),
            Err(SubmissionError::MissingField("car"))
        );
    }

    #[test]
    fn test_malformed_date() {
        let mut meta = valid();
        meta.insert("date".into(), "2025-06-03".into());
        assert!(matches!(
            LapTimeSubmission::from_metadata(&meta),
            Err(SubmissionError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_malformed_lap_time() {
        let mut meta = valid();
        meta.insert("time".into(), "abc".into());
        assert!(matches!(
            LapTimeSubmission::from_metadata(&meta),
            Err(SubmissionError::InvalidLapTime(_))
        ));
    }

    #[test]
    fn test_invalid_driver_email() {
        let mut meta = valid();
        meta.insert("driver".into(), "not-an-email".into());
        assert!(matches!(
            LapTimeSubmission::from_metadata(&meta),
            Err(SubmissionError::InvalidDriverEmail(_))
        ));
    }
}
