use serde::{Deserialize, Deserializer, Serialize};

/// A single vital measurement reported by the model.
///
/// The model is asked for `{"Test", "Value", "Unit"}` objects but is not
/// held to a schema, so `Value` accepts a JSON number or a numeric string
/// and anything else becomes `None`. Duplicate test names are kept as-is,
/// in the order the model produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VitalRecord {
    #[serde(rename = "Test", alias = "test")]
    pub test: String,
    #[serde(
        rename = "Value",
        alias = "value",
        default,
        deserialize_with = "coerce_numeric"
    )]
    pub value: Option<f64>,
    #[serde(rename = "Unit", alias = "unit", default)]
    pub unit: String,
}

/// One model call's worth of output: a prose summary plus the vitals the
/// model listed. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub vitals: Vec<VitalRecord>,
}

impl AnalysisResult {
    /// Everything-as-summary outcome: the degradation path when no vitals
    /// block could be recovered from the reply.
    pub fn summary_only(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            vitals: Vec::new(),
        }
    }

    /// Vitals with a present numeric value, for charting consumers.
    /// Records whose value failed coercion are skipped, never an error.
    pub fn numeric_vitals(&self) -> impl Iterator<Item = (&str, f64, &str)> {
        self.vitals
            .iter()
            .filter_map(|v| v.value.map(|n| (v.test.as_str(), n, v.unit.as_str())))
    }
}

/// Accept a number, a numeric string, or anything else as "missing".
fn coerce_numeric<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
