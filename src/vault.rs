//! Session-scoped document vault.
//!
//! Holds every uploaded document for the lifetime of one interactive
//! session, keyed by filename. Nothing is persisted to disk and nothing is
//! deleted within a session; a process restart starts an empty vault.
//!
//! Key properties:
//! - `name` is the deduplication key: re-uploading a name is a no-op
//! - entries move Pending → Complete when an analysis lands
//! - listing order is insertion order, stable across renames

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{AnalysisResult, AnalysisState, VaultEntry};
use crate::pipeline::extraction::MediaType;

#[derive(Error, Debug, PartialEq)]
pub enum VaultError {
    #[error("no vault entry named {0}")]
    EntryNotFound(String),

    #[error("a vault entry named {0} already exists")]
    NameTaken(String),
}

// ═══════════════════════════════════════════════════════════
// DocumentVault
// ═══════════════════════════════════════════════════════════

/// In-memory store of this session's uploaded documents.
#[derive(Default)]
pub struct DocumentVault {
    entries: HashMap<String, VaultEntry>,
    /// Insertion order of names; renames edit in place.
    order: Vec<String>,
}

impl DocumentVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a Pending entry for a new name. Uploading a name that is
    /// already tracked is a no-op; the existing entry (and any completed
    /// analysis on it) wins.
    pub fn upsert(&mut self, name: &str, media_type: MediaType, content: Vec<u8>) -> &VaultEntry {
        if !self.entries.contains_key(name) {
            tracing::info!(
                file = name,
                media_type = media_type.as_str(),
                bytes = content.len(),
                "vault: tracking new document"
            );
            self.entries
                .insert(name.to_string(), VaultEntry::new(name, media_type, content));
            self.order.push(name.to_string());
        }
        &self.entries[name]
    }

    /// Attach a completed analysis to an entry, replacing a Pending
    /// placeholder or an earlier result.
    pub fn complete(
        &mut self,
        name: &str,
        result: AnalysisResult,
    ) -> Result<&VaultEntry, VaultError> {
        let entry = self
            .entries
            .get_mut(name)
            .ok_or_else(|| VaultError::EntryNotFound(name.to_string()))?;
        entry.analysis = AnalysisState::Complete { result };
        entry.updated_at = chrono::Utc::now();
        Ok(entry)
    }

    /// Rename an entry, keeping its position in insertion order.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<(), VaultError> {
        if self.entries.contains_key(new) {
            return Err(VaultError::NameTaken(new.to_string()));
        }
        let mut entry = self
            .entries
            .remove(old)
            .ok_or_else(|| VaultError::EntryNotFound(old.to_string()))?;
        entry.name = new.to_string();
        entry.updated_at = chrono::Utc::now();
        self.entries.insert(new.to_string(), entry);
        if let Some(slot) = self.order.iter_mut().find(|n| *n == old) {
            *slot = new.to_string();
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&VaultEntry> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// All entries, in upload order.
    pub fn entries(&self) -> impl Iterator<Item = &VaultEntry> {
        self.order.iter().filter_map(|name| self.entries.get(name))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VitalRecord;

    fn sample_result() -> AnalysisResult {
        AnalysisResult {
            summary: "All within range.".into(),
            vitals: vec![VitalRecord {
                test: "Glucose".into(),
                value: Some(95.0),
                unit: "mg/dL".into(),
            }],
        }
    }

    #[test]
    fn upsert_tracks_new_documents_in_order() {
        let mut vault = DocumentVault::new();
        vault.upsert("a.pdf", MediaType::Pdf, vec![1]);
        vault.upsert("b.txt", MediaType::PlainText, vec![2]);

        let names: Vec<_> = vault.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.txt"]);
        assert_eq!(vault.len(), 2);
    }

    #[test]
    fn reupload_of_same_name_is_a_noop() {
        let mut vault = DocumentVault::new();
        vault.upsert("report.pdf", MediaType::Pdf, vec![1, 2, 3]);
        vault.complete("report.pdf", sample_result()).unwrap();

        // Second upload under the same name must not clobber the analysis.
        vault.upsert("report.pdf", MediaType::Pdf, vec![9, 9, 9]);

        let entry = vault.get("report.pdf").unwrap();
        assert_eq!(entry.content, vec![1, 2, 3]);
        assert!(!entry.analysis.is_pending());
        assert_eq!(vault.len(), 1);
    }

    #[test]
    fn complete_fills_a_pending_entry() {
        let mut vault = DocumentVault::new();
        vault.upsert("labs.txt", MediaType::PlainText, vec![]);
        assert!(vault.get("labs.txt").unwrap().analysis.is_pending());

        let entry = vault.complete("labs.txt", sample_result()).unwrap();
        let result = entry.analysis.result().unwrap();
        assert_eq!(result.summary, "All within range.");
        assert!(entry.updated_at >= entry.created_at);
    }

    #[test]
    fn complete_unknown_name_errors() {
        let mut vault = DocumentVault::new();
        let err = vault.complete("ghost.pdf", sample_result()).unwrap_err();
        assert_eq!(err, VaultError::EntryNotFound("ghost.pdf".into()));
    }

    #[test]
    fn rename_keeps_insertion_order() {
        let mut vault = DocumentVault::new();
        vault.upsert("a.pdf", MediaType::Pdf, vec![]);
        vault.upsert("b.pdf", MediaType::Pdf, vec![]);
        vault.upsert("c.pdf", MediaType::Pdf, vec![]);

        vault.rename("b.pdf", "bloodwork.pdf").unwrap();

        let names: Vec<_> = vault.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "bloodwork.pdf", "c.pdf"]);
        assert!(vault.get("b.pdf").is_none());
        assert!(vault.contains("bloodwork.pdf"));
    }

    #[test]
    fn rename_onto_existing_name_errors() {
        let mut vault = DocumentVault::new();
        vault.upsert("a.pdf", MediaType::Pdf, vec![]);
        vault.upsert("b.pdf", MediaType::Pdf, vec![]);

        let err = vault.rename("a.pdf", "b.pdf").unwrap_err();
        assert_eq!(err, VaultError::NameTaken("b.pdf".into()));
        // Both originals untouched.
        assert!(vault.contains("a.pdf"));
        assert!(vault.contains("b.pdf"));
    }

    #[test]
    fn rename_missing_entry_errors() {
        let mut vault = DocumentVault::new();
        let err = vault.rename("nope.pdf", "still-nope.pdf").unwrap_err();
        assert_eq!(err, VaultError::EntryNotFound("nope.pdf".into()));
    }
}
