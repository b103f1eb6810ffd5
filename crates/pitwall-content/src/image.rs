//! Featured-image fetching.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::error::{ContentError, ContentResult};

/// Deadline for a single image download. Featured images are small; a slow
/// image host must not stall a whole sync.
pub const IMAGE_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Published file extension for a featured image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageExt {
    Jpg,
    Png,
    Gif,
    Webp,
}

impl ImageExt {
    /// Infer from a Content-Type header value; unrecognized types fall back
    /// to jpg.
    pub fn from_media_type(media_type: &str) -> Self {
        let media_type = media_type.to_ascii_lowercase();
        if media_type.contains("png") {
            Self::Png
        } else if media_type.contains("gif") {
            Self::Gif
        } else if media_type.contains("webp") {
            Self::Webp
        } else {
            Self::Jpg
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
        }
    }
}

/// A downloaded featured image.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    pub ext: ImageExt,
}

/// Download an image, deriving its published extension from the declared
/// media type.
pub async fn fetch_image(http: &Client, url: &str) -> ContentResult<FetchedImage> {
    let response = http
        .get(url)
        .timeout(IMAGE_FETCH_TIMEOUT)
        .send()
        .await
        .map_err(|e| ContentError::ImageFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ContentError::ImageFetch {
            url: url.to_string(),
            reason: format!("status {}", status),
        });
    }

    let ext = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ImageExt::from_media_type)
        .unwrap_or(ImageExt::Jpg);

    let bytes = response
        .bytes()
        .await
        .map_err(|e| ContentError::ImageFetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?
        .to_vec();

    debug!(url = %url, bytes = bytes.len(), ext = ext.as_str(), "Fetched featured image");
    Ok(FetchedImage { bytes, ext })
}
