//! Shared data models for the Pitwall automation service.
//!
//! This crate provides Serde-serializable types for:
//! - Lap-time records and their ingestion pipeline (metadata extraction,
//!   lap-time parsing, typed submission validation)
//! - Blog posts and users read from the document store
//! - Video category classification for channel uploads

pub mod blog;
pub mod category;
pub mod laptime;
pub mod metadata;
pub mod submission;
pub mod track_time;
pub mod user;
pub mod video;

// Re-export common types
pub use blog::BlogPost;
pub use category::VideoCategory;
pub use laptime::{parse_lap_time, LapTimeError};
pub use metadata::extract_metadata;
pub use submission::{LapTimeSubmission, SubmissionError};
pub use track_time::TrackTime;
pub use user::User;
pub use video::VideoId;
