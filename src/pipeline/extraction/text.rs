use super::ExtractionError;

/// Decode an uploaded plain-text file as UTF-8.
///
/// Invalid byte sequences are a hard failure for this file, propagated to
/// the caller; there is no lossy recovery.
pub fn decode_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| ExtractionError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_utf8_decodes() {
        let text = decode_text("Hämoglobin 14,2 g/dL".as_bytes()).unwrap();
        assert_eq!(text, "Hämoglobin 14,2 g/dL");
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let err = decode_text(&[0x48, 0x69, 0xFF, 0xFE]).unwrap_err();
        assert!(matches!(err, ExtractionError::Encoding(_)));
    }
}
