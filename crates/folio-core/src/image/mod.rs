//! Upload intake for portfolio images.
//!
//! An entry's image is either a pasted URL (stored as-is) or a local file
//! upload. Uploads are converted into a self-contained `data:` URI before
//! they reach the list, so the stored snapshot never references local
//! files. Non-image bytes and files above the configured ceiling are
//! rejected with a validation failure; nothing is truncated.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::ImageFormat;
use thiserror::Error;

/// Substituted per-entry at render time when an image fails to load.
/// Never blocks rendering of sibling entries.
pub const FALLBACK_IMAGE_URL: &str =
    "https://images.unsplash.com/photo-1618005182384-a83a8bd57fbe?ixlib=rb-4.0.3&q=85&fm=jpg&crop=entropy&cs=srgb&w=640";

/// Default upload ceiling: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Where an entry's image comes from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Remote URL (or an already-embedded `data:` URI, e.g. when editing an
    /// entry whose image was uploaded earlier).
    Url(String),
    /// A local file picked in the admin form.
    Upload { file_name: String, bytes: Vec<u8> },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("uploaded file is empty")]
    EmptyUpload,

    #[error("uploaded file is {actual} bytes, above the {limit} byte ceiling")]
    TooLarge { actual: u64, limit: u64 },

    #[error("uploaded file is not a supported image format")]
    NotAnImage,
}

/// Resolve an image source to the string stored in `imageUrl`.
///
/// URLs pass through untouched. Uploads are sniffed by magic bytes
/// (PNG, JPEG, GIF, WebP), bounded by `max_bytes`, and embedded as
/// `data:<mime>;base64,<payload>`.
pub fn resolve_image(source: &ImageSource, max_bytes: u64) -> Result<String, ImageError> {
    match source {
        ImageSource::Url(url) => Ok(url.trim().to_string()),
        ImageSource::Upload { bytes, .. } => {
            if bytes.is_empty() {
                return Err(ImageError::EmptyUpload);
            }
            if bytes.len() as u64 > max_bytes {
                return Err(ImageError::TooLarge {
                    actual: bytes.len() as u64,
                    limit: max_bytes,
                });
            }
            let mime = sniff_mime(bytes)?;
            Ok(format!("data:{mime};base64,{}", BASE64.encode(bytes)))
        }
    }
}

/// Magic-byte sniff restricted to the formats browsers render.
fn sniff_mime(bytes: &[u8]) -> Result<&'static str, ImageError> {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => Ok("image/png"),
        Ok(ImageFormat::Jpeg) => Ok("image/jpeg"),
        Ok(ImageFormat::Gif) => Ok("image/gif"),
        Ok(ImageFormat::WebP) => Ok("image/webp"),
        _ => Err(ImageError::NotAnImage),
    }
}
