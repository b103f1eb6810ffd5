//! Blog post rendering and publishing.
//!
//! This crate provides:
//! - The content renderer: blog post + author lookup → frontmatter markdown,
//!   byte-stable for identical input
//! - Featured-image fetching with media-type driven extensions
//! - The content publisher: content-hash diffing against the repository and
//!   atomic multi-file commits via the git data API

pub mod batch;
pub mod error;
pub mod image;
pub mod publish;
pub mod render;

pub use batch::{CommitBatch, FileContent};
pub use error::{ContentError, ContentResult};
pub use image::{FetchedImage, ImageExt};
pub use publish::{PublishOutcome, Publisher};
pub use render::{render_post, RenderError};
