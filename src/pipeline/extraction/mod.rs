pub mod extractor;
pub mod format;
pub mod image;
pub mod pdf;
pub mod text;
pub mod types;

pub use extractor::*;
pub use format::*;
pub use types::*;

use thiserror::Error;

/// Failures while turning an uploaded file into model evidence.
///
/// All of these abort processing of that file and surface to the caller;
/// there is no local recovery for unusable input.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported media type: {0}")]
    UnsupportedFormat(String),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("image decoding failed: {0}")]
    ImageDecode(String),

    #[error("text encoding error: {0}")]
    Encoding(String),
}
