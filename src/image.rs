//! Image fill resolution into embeddable data URIs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{Error, Result};

/// Raster formats that can be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
}

impl ImageFormat {
    /// Sniff the format from the leading magic bytes.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        // PNG: 89 50 4E, JPEG: FF D8 FF
        if data.starts_with(&[0x89, 0x50, 0x4E]) {
            Some(ImageFormat::Png)
        } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else {
            None
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }
}

/// A base64 `data:` URI for an embedded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub format: ImageFormat,
    uri: String,
}

impl DataUri {
    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl std::fmt::Display for DataUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.uri)
    }
}

/// Encode image bytes as a data URI.
///
/// # Examples
///
/// ```
/// use scenemark::image::resolve_image;
///
/// let uri = resolve_image(&[0xFF, 0xD8, 0xFF, 0xE0]).unwrap();
/// assert_eq!(uri.as_str(), "data:image/jpeg;base64,/9j/4A==");
/// assert!(resolve_image(b"GIF89a").is_err());
/// ```
pub fn resolve_image(data: &[u8]) -> Result<DataUri> {
    let format = ImageFormat::sniff(data)
        .ok_or_else(|| Error::UnsupportedImageFormat(data.iter().take(3).copied().collect()))?;
    let uri = format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(data));
    Ok(DataUri { format, uri })
}
