use super::AnalysisError;
use crate::pipeline::extraction::Evidence;

/// One outbound model call: the document evidence plus the instruction for
/// this interaction. The system prompt is fixed per task kind.
#[derive(Debug)]
pub struct ModelRequest<'a> {
    pub evidence: &'a Evidence,
    pub prompt: String,
    pub system: &'static str,
}

impl<'a> ModelRequest<'a> {
    pub fn new(evidence: &'a Evidence, prompt: String, system: &'static str) -> Self {
        Self {
            evidence,
            prompt,
            system,
        }
    }
}

/// Hosted model abstraction (allows mocking).
///
/// Implementations own transport and authentication; callers own retry.
/// A rate-limit signal must surface as `AnalysisError::RateLimited` so the
/// retry loop can tell it apart from terminal failures.
pub trait ModelClient {
    fn generate(&self, model: &str, request: &ModelRequest<'_>) -> Result<String, AnalysisError>;
}
