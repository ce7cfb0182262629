use super::image::decode_image;
use super::pdf::extract_pdf_pages;
use super::text::decode_text;
use super::types::Evidence;
use super::{ExtractionError, MediaType};

/// Turn an uploaded file into model evidence.
///
/// PDFs and text files become `Evidence::Text`; images become
/// `Evidence::Image`. The input bytes are read exactly once.
pub fn extract(bytes: &[u8], media_type: MediaType) -> Result<Evidence, ExtractionError> {
    match media_type {
        MediaType::Pdf => {
            let pages = extract_pdf_pages(bytes)?;
            tracing::info!(pages = pages.len(), "PDF text layer extracted");
            Ok(Evidence::Text(pages.concat()))
        }
        MediaType::Jpeg | MediaType::Png => Ok(Evidence::Image(decode_image(bytes, media_type)?)),
        MediaType::PlainText => Ok(Evidence::Text(decode_text(bytes)?)),
    }
}

/// Extract against a caller-declared MIME type, the upload-form contract:
/// anything outside {pdf, jpeg, png, plain text} is `UnsupportedFormat`.
pub fn extract_with_declared_type(
    bytes: &[u8],
    declared_media_type: &str,
) -> Result<Evidence, ExtractionError> {
    let media_type = MediaType::from_mime(declared_media_type)
        .ok_or_else(|| ExtractionError::UnsupportedFormat(declared_media_type.to_string()))?;
    extract(bytes, media_type)
}
