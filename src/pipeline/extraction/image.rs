use super::types::ImageEvidence;
use super::{ExtractionError, MediaType};

/// Decode an uploaded JPEG/PNG into an in-memory bitmap.
///
/// The bitmap is the evidence; reading its contents is left to the model's
/// vision capability. Decoding up front rejects corrupt uploads before any
/// model call is made.
pub fn decode_image(bytes: &[u8], media_type: MediaType) -> Result<ImageEvidence, ExtractionError> {
    let bitmap =
        image::load_from_memory(bytes).map_err(|e| ExtractionError::ImageDecode(e.to_string()))?;

    tracing::debug!(
        media_type = media_type.as_str(),
        width = bitmap.width(),
        height = bitmap.height(),
        "image evidence decoded"
    );

    Ok(ImageEvidence {
        mime_type: media_type.mime().to_string(),
        bytes: bytes.to_vec(),
        bitmap,
    })
}
