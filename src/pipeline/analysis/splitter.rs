//! Splits a raw model reply into a prose summary and a vitals list.
//!
//! The model is asked, by instruction only, to end its reply with a JSON
//! array of vitals. There is no guaranteed delimiter, so the array is
//! recovered by scanning for the last `[` and last `]`. Every failure mode
//! degrades to "whole reply is the summary, no vitals"; this function
//! never fails outward.

use crate::models::{AnalysisResult, VitalRecord};

/// Split a model reply into summary and vitals.
pub fn split_model_reply(raw: &str) -> AnalysisResult {
    let Some((prefix, array)) = locate_trailing_array(raw) else {
        return AnalysisResult::summary_only(raw.trim());
    };

    match parse_vitals_array(array) {
        Ok(vitals) => AnalysisResult {
            summary: prefix.trim().to_string(),
            vitals,
        },
        Err(err) => {
            // Malformed vitals block: keep the full reply as the summary.
            tracing::debug!(error = %err, "vitals block did not parse, degrading to summary-only");
            AnalysisResult::summary_only(raw.trim())
        }
    }
}

/// Find the candidate vitals block: the span from the LAST `[` to the LAST
/// `]`, when the `]` comes strictly after the `[`. Returns the text before
/// the block and the block itself (brackets inclusive).
fn locate_trailing_array(raw: &str) -> Option<(&str, &str)> {
    let open = raw.rfind('[')?;
    let close = raw.rfind(']')?;
    if close <= open {
        return None;
    }
    Some((&raw[..open], &raw[open..=close]))
}

/// Parse the bracketed block as a JSON array of vitals records, skipping
/// items that do not look like records at all.
fn parse_vitals_array(array: &str) -> Result<Vec<VitalRecord>, serde_json::Error> {
    let items: Vec<serde_json::Value> = serde_json::from_str(array)?;
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<VitalRecord>(item).ok())
        .collect())
}
