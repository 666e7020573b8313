//! Hosted image CDN seam.
//!
//! The host accepts raw bytes plus a named preset and returns a stable
//! public URL. Bounding happens before upload: anything over the ceiling is
//! rejected outright, anything over the target size goes through the
//! compressor seam first so storage and bandwidth stay bounded.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

/// Size bounds applied before an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLimits {
    /// Hard ceiling; larger payloads are rejected.
    pub max_upload_bytes: usize,
    /// Payloads above this are shrunk before upload.
    pub target_bytes: usize,
    /// Longest edge the compressor should downscale to.
    pub max_dimension: u32,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
            target_bytes: 1024 * 1024,
            max_dimension: 1024,
        }
    }
}

/// Errors from bounding and uploading images.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ImageError {
    #[error("Image is too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },

    #[error("Image compression failed: {0}")]
    CompressionFailed(String),

    #[error("Image upload failed: {0}")]
    UploadFailed(String),
}

/// The hosted image CDN.
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Uploads bytes under a named preset, returning the public URL.
    async fn upload(&self, image: Vec<u8>, preset: &str) -> Result<String, ImageError>;
}

/// The client-side compressor that downscales oversized images.
#[async_trait]
pub trait ImageCompressor: Send + Sync {
    /// Shrinks the payload toward `limits.target_bytes` /
    /// `limits.max_dimension`.
    async fn shrink(&self, image: Vec<u8>, limits: &ImageLimits) -> Result<Vec<u8>, ImageError>;
}

/// Bounds an image and uploads it.
///
/// Rejects payloads over the ceiling, shrinks payloads over the target, and
/// hands the result to the host.
pub async fn bounded_upload(
    host: &dyn ImageHost,
    compressor: &dyn ImageCompressor,
    limits: &ImageLimits,
    image: Vec<u8>,
    preset: &str,
) -> Result<String, ImageError> {
    let size = image.len();
    if size > limits.max_upload_bytes {
        return Err(ImageError::TooLarge {
            size,
            limit: limits.max_upload_bytes,
        });
    }

    let image = if size > limits.target_bytes {
        debug!(size, target = limits.target_bytes, "Shrinking image");
        compressor.shrink(image, limits).await?
    } else {
        image
    };

    let url = host.upload(image, preset).await?;
    info!(preset, %url, "Image uploaded");
    Ok(url)
}
