//! GitHub REST client for the content repository.
//!
//! This crate provides:
//! - Contents reads (file bytes + blob sha at a path on a branch)
//! - Git data writes: blob, tree layered on a base tree, commit
//! - Branch ref read and a fast-forward-only ref update, which makes
//!   concurrent publishes lose cleanly instead of clobbering each other

pub mod client;
pub mod error;
pub mod types;

pub use client::{GithubClient, GithubConfig};
pub use error::{GithubError, GithubResult};
pub use types::{CommitIdentity, RepoFile, TreeEntry};
