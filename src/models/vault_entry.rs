use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::analysis::AnalysisResult;
use crate::pipeline::extraction::MediaType;

/// Whether an uploaded document has been analyzed yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisState {
    /// Uploaded and extracted, analysis not yet completed.
    Pending,
    Complete { result: AnalysisResult },
}

impl AnalysisState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// The completed analysis, if there is one.
    pub fn result(&self) -> Option<&AnalysisResult> {
        match self {
            Self::Pending => None,
            Self::Complete { result } => Some(result),
        }
    }
}

/// One uploaded document tracked for the lifetime of the session.
///
/// `name` is the deduplication key in the vault; see `DocumentVault`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntry {
    pub id: Uuid,
    pub name: String,
    pub media_type: MediaType,
    /// Raw uploaded bytes, kept so the document can be re-analyzed or
    /// handed back to the caller without a second upload.
    pub content: Vec<u8>,
    pub analysis: AnalysisState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VaultEntry {
    /// Fresh entry in the Pending state.
    pub fn new(name: impl Into<String>, media_type: MediaType, content: Vec<u8>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            media_type,
            content,
            analysis: AnalysisState::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entry_starts_pending() {
        let entry = VaultEntry::new("report.pdf", MediaType::Pdf, vec![1, 2, 3]);
        assert!(entry.analysis.is_pending());
        assert!(entry.analysis.result().is_none());
        assert_eq!(entry.created_at, entry.updated_at);
    }

    #[test]
    fn complete_state_exposes_result() {
        let state = AnalysisState::Complete {
            result: AnalysisResult::summary_only("All clear."),
        };
        assert!(!state.is_pending());
        assert_eq!(state.result().unwrap().summary, "All clear.");
    }
}
