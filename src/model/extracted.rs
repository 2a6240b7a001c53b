//! Report shapes as the LLM emits them, before normalization

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Risk report decoded from model output.
///
/// Only `contract_summary` is required; everything else is filled in
/// during assembly.
#[derive(Debug, Clone, Deserialize)]
pub struct ExtractedReport {
    pub contract_summary: String,
    #[serde(default)]
    pub risky_clauses: Option<Vec<ExtractedClause>>,
}

/// A single clause as decoded from model output.
///
/// Numbers and booleans are kept as their text; arrays, objects and nulls
/// are treated as missing so one odd field does not discard the report.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractedClause {
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub clause_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub risk_explanation: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub severity: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}
