/// The single unit of input handed to the model for one uploaded file:
/// plain text for PDFs and text files, a decoded image for photos and
/// scans. Owned by the current request, never persisted.
#[derive(Debug, Clone)]
pub enum Evidence {
    Text(String),
    Image(ImageEvidence),
}

impl Evidence {
    /// Extracted text, when this evidence is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Image(_) => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image(_))
    }
}

/// A decoded uploaded image. No OCR happens locally; reading the image is
/// deferred to the model's vision capability. The original encoded bytes
/// are kept alongside the bitmap because that is what the transport sends.
#[derive(Debug, Clone)]
pub struct ImageEvidence {
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub bitmap: image::DynamicImage,
}

impl ImageEvidence {
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }
}
