use serde::{Deserialize, Serialize};

use super::ExtractionError;

/// The media types the pipeline accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Pdf,
    Jpeg,
    Png,
    PlainText,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::PlainText => "plain_text",
        }
    }

    /// Canonical MIME string for this type.
    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::PlainText => "text/plain",
        }
    }

    pub fn is_image(self) -> bool {
        matches!(self, Self::Jpeg | Self::Png)
    }

    /// Parse a declared MIME string. Anything outside the accepted set is
    /// `None`; the caller turns that into `UnsupportedFormat`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "application/pdf" => Some(Self::Pdf),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "text/plain" => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Detect from magic bytes. Magic bytes don't lie — declared types and
    /// extensions can be wrong. Plain text has no signature and is never
    /// sniffed.
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        match bytes {
            // %PDF
            [0x25, 0x50, 0x44, 0x46, ..] => Some(Self::Pdf),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [0x89, 0x50, 0x4E, 0x47, ..] => Some(Self::Png),
            _ => None,
        }
    }

    /// Guess from the filename extension.
    pub fn from_name(name: &str) -> Option<Self> {
        let guess = mime_guess::from_path(name).first()?;
        Self::from_mime(guess.essence_str())
    }
}

/// Resolve the media type of an upload: signature bytes first, then the
/// declared MIME type, then the filename extension.
pub fn resolve_media_type(
    declared: Option<&str>,
    name: &str,
    bytes: &[u8],
) -> Result<MediaType, ExtractionError> {
    if let Some(sniffed) = MediaType::sniff(bytes) {
        if let Some(decl) = declared {
            if MediaType::from_mime(decl) != Some(sniffed) {
                tracing::warn!(
                    declared = decl,
                    detected = sniffed.as_str(),
                    file = name,
                    "declared media type disagrees with file signature"
                );
            }
        }
        return Ok(sniffed);
    }

    if let Some(decl) = declared {
        return MediaType::from_mime(decl)
            .ok_or_else(|| ExtractionError::UnsupportedFormat(decl.to_string()));
    }

    MediaType::from_name(name).ok_or_else(|| ExtractionError::UnsupportedFormat(name.to_string()))
}
