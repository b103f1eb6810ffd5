//! Ingestion error types.

use thiserror::Error;

/// Result type for ingestion operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Upstream failures that abort an ingestion run.
///
/// Per-item validation problems are not errors: those items are logged and
/// skipped while the batch continues.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error(transparent)]
    YouTube(#[from] pitwall_youtube::YouTubeError),

    #[error(transparent)]
    Firestore(#[from] pitwall_firestore::FirestoreError),
}
