//! Document processing entry point.
//!
//! Drives one upload through the whole pipeline:
//! resolve media type → extract evidence → vault Pending entry →
//! model analysis (with retry) → vault Complete.

use super::analysis::{AnalysisError, DocumentAnalyzer, GeminiClient};
use super::extraction::{extract, resolve_media_type, Evidence, ExtractionError};
use crate::config;
use crate::models::VaultEntry;
use crate::vault::{DocumentVault, VaultError};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur while processing one upload. Extraction and model
/// errors abort that file; the vault stays consistent either way.
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("vault error: {0}")]
    Vault(#[from] VaultError),
}

// ---------------------------------------------------------------------------
// Processor
// ---------------------------------------------------------------------------

/// One user session: an analyzer bound to a model client, plus the
/// session's private vault. Single-threaded, one interaction at a time.
pub struct DocumentProcessor {
    analyzer: DocumentAnalyzer,
    vault: DocumentVault,
}

impl DocumentProcessor {
    pub fn new(analyzer: DocumentAnalyzer) -> Self {
        Self {
            analyzer,
            vault: DocumentVault::new(),
        }
    }

    /// Processor against the hosted model with all defaults: key from the
    /// environment, default model, default retry policy.
    pub fn from_env() -> Result<Self, AnalysisError> {
        let client = GeminiClient::from_env()?;
        Ok(Self::new(DocumentAnalyzer::new(
            Box::new(client),
            config::DEFAULT_MODEL,
        )))
    }

    /// Ingest and analyze one uploaded file.
    ///
    /// The vault entry is created as soon as extraction succeeds, so a
    /// failed or busy model call leaves a Pending entry behind that a
    /// later `process` call for the same name can fill in.
    pub fn process(
        &mut self,
        name: &str,
        declared_media_type: Option<&str>,
        bytes: &[u8],
        language: Option<&str>,
    ) -> Result<&VaultEntry, ProcessingError> {
        let media_type = resolve_media_type(declared_media_type, name, bytes)?;
        tracing::info!(
            file = name,
            media_type = media_type.as_str(),
            "processing upload"
        );

        let evidence = extract(bytes, media_type)?;
        self.vault.upsert(name, media_type, bytes.to_vec());

        let result = self.analyzer.analyze(&evidence, language)?;
        Ok(self.vault.complete(name, result)?)
    }

    /// Ask a follow-up question about an already-vaulted document.
    pub fn ask(&self, name: &str, question: &str) -> Result<String, ProcessingError> {
        let evidence = self.evidence_for(name)?;
        Ok(self.analyzer.ask(&evidence, question)?)
    }

    /// Generate a diet plan from an already-vaulted document.
    pub fn diet_plan(
        &self,
        name: &str,
        language: Option<&str>,
    ) -> Result<String, ProcessingError> {
        let evidence = self.evidence_for(name)?;
        Ok(self.analyzer.diet_plan(&evidence, language)?)
    }

    /// Re-extract evidence for a vaulted document from its stored bytes.
    fn evidence_for(&self, name: &str) -> Result<Evidence, ProcessingError> {
        let entry = self
            .vault
            .get(name)
            .ok_or_else(|| VaultError::EntryNotFound(name.to_string()))?;
        Ok(extract(&entry.content, entry.media_type)?)
    }

    pub fn vault(&self) -> &DocumentVault {
        &self.vault
    }

    pub fn vault_mut(&mut self) -> &mut DocumentVault {
        &mut self.vault
    }
}
