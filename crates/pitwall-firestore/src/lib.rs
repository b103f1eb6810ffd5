//! Firestore REST API client.
//!
//! This crate provides:
//! - A thin client over the Firestore REST API with service account
//!   authentication via gcp_auth and a cached access token
//! - Emulator support (`FIRESTORE_EMULATOR_HOST`) for local runs and tests
//! - Typed repositories for lap times, users, and blog posts
//!
//! The client deliberately has no retry layer: a failed document-store call
//! surfaces to the trigger caller, who re-invokes idempotently.

pub mod auth;
pub mod client;
pub mod error;
pub mod metrics;
pub mod repos;
pub mod types;

pub use client::{FirestoreClient, FirestoreConfig};
pub use error::{FirestoreError, FirestoreResult};
pub use repos::{BlogPostRepository, TrackTimeRepository, UserRepository};
pub use types::{Document, FromFirestoreValue, ToFirestoreValue, Value};
