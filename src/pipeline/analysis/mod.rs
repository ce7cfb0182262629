pub mod analyzer;
pub mod gemini;
pub mod prompt;
pub mod splitter;
pub mod types;

pub use analyzer::*;
pub use gemini::*;
pub use prompt::*;
pub use splitter::*;
pub use types::*;

use thiserror::Error;

/// Failures while querying the hosted model.
///
/// Response *parsing* never appears here: a reply that fails to split is
/// downgraded to a summary-only result, not an error.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("no API key: set {} or pass a key explicitly", crate::config::API_KEY_ENV)]
    MissingApiKey,

    #[error("cannot reach the model service at {0}")]
    Connection(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("model service returned error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("model service rate limited the request")]
    RateLimited,

    #[error("model service still busy after {attempts} attempts")]
    ServiceBusy { attempts: usize },

    #[error("model reply could not be read: {0}")]
    ResponseParsing(String),
}
