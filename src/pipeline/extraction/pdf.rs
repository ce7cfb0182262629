use super::ExtractionError;

/// Extract the text layer of every page, in page order.
///
/// A page with no extractable text (scanned, image-only) yields an empty
/// string; it never fails the document.
pub fn extract_pdf_pages(pdf_bytes: &[u8]) -> Result<Vec<String>, ExtractionError> {
    pdf_extract::extract_text_from_mem_by_pages(pdf_bytes)
        .map_err(|e| ExtractionError::PdfParsing(e.to_string()))
}

/// Concatenated text of the whole document, page order preserved.
pub fn extract_pdf_text(pdf_bytes: &[u8]) -> Result<String, ExtractionError> {
    Ok(extract_pdf_pages(pdf_bytes)?.concat())
}
