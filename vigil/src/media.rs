//! Image encoding for multimodal requests.
//!
//! Vision APIs accept images inline as base64 data URLs. This module turns a
//! local image file into that representation, deriving the declared MIME
//! subtype from the file extension.
//!
//! # Example
//!
//! ```rust,ignore
//! use vigil::media::EncodedImage;
//!
//! let image = EncodedImage::load("site/helmet.webp").await?;
//! assert!(image.as_str().starts_with("data:image/webp;base64,"));
//! ```

use crate::error::EncodeError;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Supported image formats for multimodal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ImageFormat {
    /// JPEG format (default for unrecognized extensions).
    #[default]
    Jpeg,
    /// PNG format.
    Png,
    /// GIF format.
    Gif,
    /// WebP format.
    Webp,
    /// BMP format.
    Bmp,
}

impl ImageFormat {
    /// Get the MIME subtype for this format.
    #[must_use]
    pub const fn subtype(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Webp => "webp",
            Self::Bmp => "bmp",
        }
    }

    /// Get the MIME type for this format.
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
            Self::Bmp => "image/bmp",
        }
    }

    /// Detect format from a file extension (case-insensitive).
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "png" => Some(Self::Png),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::Webp),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Detect format from a file path, falling back to JPEG.
    ///
    /// The subtype is a best-effort heuristic taken from the extension, not
    /// content sniffing. A mismatched extension produces a mislabeled but
    /// structurally valid data URL.
    #[must_use]
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_default()
    }
}

/// A self-describing inline image, formatted as a base64 data URL.
///
/// The value is immutable once created and is consumed directly by the
/// message builder; it holds the complete
/// `data:image/<subtype>;base64,<payload>` token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    data_url: String,
    format: ImageFormat,
}

impl EncodedImage {
    /// Read an image file and encode it as a base64 data URL.
    ///
    /// The whole file is read in one pass and the handle released before the
    /// value is returned. The declared subtype comes from the extension after
    /// the last `.` in the path; unmapped or missing extensions default to
    /// `jpeg`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::FileNotFound`] if the file does not exist, or
    /// [`EncodeError::Read`] for any other read failure.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, EncodeError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await.map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                EncodeError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                EncodeError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Ok(Self::from_bytes(&bytes, ImageFormat::from_path(path)))
    }

    /// Encode in-memory image bytes as a base64 data URL.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], format: ImageFormat) -> Self {
        let data_url = format!("data:{};base64,{}", format.mime_type(), BASE64.encode(bytes));
        Self { data_url, format }
    }

    /// Get the declared image format.
    #[must_use]
    pub const fn format(&self) -> ImageFormat {
        self.format
    }

    /// Get the data URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.data_url
    }

    /// Consume the value, returning the data URL string.
    #[must_use]
    pub fn into_string(self) -> String {
        self.data_url
    }
}

impl std::fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Payloads can be megabytes; show the shape, not the data.
        let header = "data:;base64,".len() + self.format.mime_type().len();
        let payload = self.data_url.len().saturating_sub(header);
        write!(
            f,
            "[Image: ~{} bytes, {}]",
            payload * 3 / 4,
            self.format.mime_type()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use base64::Engine as _;

    #[test]
    fn format_from_extension_is_case_insensitive() {
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("JPEG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("GIF"), Some(ImageFormat::Gif));
        assert_eq!(ImageFormat::from_extension("webp"), Some(ImageFormat::Webp));
        assert_eq!(ImageFormat::from_extension("BMP"), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::from_extension("tiff"), None);
    }

    #[test]
    fn format_from_path_defaults_to_jpeg() {
        assert_eq!(ImageFormat::from_path("archive.tar.gz"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path("no_extension"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path("photo.WEBP"), ImageFormat::Webp);
    }

    #[test]
    fn from_bytes_builds_data_url() {
        let image = EncodedImage::from_bytes(&[1, 2, 3, 4, 5], ImageFormat::Png);
        assert_eq!(image.as_str(), "data:image/png;base64,AQIDBAU=");
        assert_eq!(image.format(), ImageFormat::Png);
    }

    #[tokio::test]
    async fn load_encodes_file_contents_exactly() {
        let file = assert_fs::NamedTempFile::new("x.PNG").unwrap();
        let bytes: [u8; 10] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];
        file.write_binary(&bytes).unwrap();

        let image = EncodedImage::load(file.path()).await.unwrap();
        assert_eq!(image.format(), ImageFormat::Png);

        let payload = image
            .as_str()
            .strip_prefix("data:image/png;base64,")
            .expect("data URL prefix");
        assert_eq!(BASE64.decode(payload).unwrap(), bytes);
    }

    #[tokio::test]
    async fn load_unmapped_extension_defaults_to_jpeg() {
        let file = assert_fs::NamedTempFile::new("archive.tar.gz").unwrap();
        file.write_binary(b"not an image").unwrap();

        let image = EncodedImage::load(file.path()).await.unwrap();
        assert!(image.as_str().starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn load_missing_file_is_a_tagged_error() {
        let err = EncodedImage::load("vl_demo/does_not_exist.webp")
            .await
            .unwrap_err();
        match err {
            EncodeError::FileNotFound { path } => {
                assert!(path.ends_with("does_not_exist.webp"));
            }
            other => panic!("expected FileNotFound, got {other:?}"),
        }
    }
}
