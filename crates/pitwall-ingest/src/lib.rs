//! Ingestion orchestrator.
//!
//! Pulls recent channel uploads, classifies them by title prefix, and routes
//! each recognized category to its processor. Lap-time uploads flow through
//! metadata extraction, typed validation, driver resolution, and an
//! idempotent upsert keyed by the proof URL. One malformed upload never
//! aborts the batch; a failed upstream call does, and surfaces to the
//! trigger caller.

pub mod error;
pub mod ingestor;

pub use error::{IngestError, IngestResult};
pub use ingestor::{IngestSummary, Ingestor};
