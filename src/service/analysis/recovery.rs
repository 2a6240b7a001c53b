//! Recovery of a structured report from raw model output
//!
//! Model output is not guaranteed to be valid JSON. Decoding strategies are
//! tried in order and the first one that yields a report-shaped object wins.
//! When none does, the raw text is kept so the caller can still show it.

use serde_json::Value;

use crate::model::ExtractedReport;

/// How a structured report was recovered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryStrategy {
    /// The whole output decoded as a report
    Direct,
    /// The span from the first `{` to the last `}` decoded as a report
    BraceExtraction,
}

impl RecoveryStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecoveryStrategy::Direct => "direct",
            RecoveryStrategy::BraceExtraction => "brace_extraction",
        }
    }
}

/// Outcome of recovery: a decoded report, or the untouched output
#[derive(Debug, Clone)]
pub enum RecoveredReport {
    Structured {
        report: ExtractedReport,
        strategy: RecoveryStrategy,
    },
    Unparsed(String),
}

type DecodeStrategy = fn(&str) -> Option<ExtractedReport>;

const STRATEGIES: &[(RecoveryStrategy, DecodeStrategy)] = &[
    (RecoveryStrategy::Direct, decode_direct),
    (RecoveryStrategy::BraceExtraction, decode_brace_span),
];

/// Recover a report from raw model output. Never fails.
pub fn recover(raw_output: &str) -> RecoveredReport {
    for (strategy, decode) in STRATEGIES {
        if let Some(report) = decode(raw_output) {
            tracing::debug!(
                strategy = strategy.as_str(),
                output_length = raw_output.len(),
                "Recovered structured report from model output"
            );
            return RecoveredReport::Structured {
                report,
                strategy: *strategy,
            };
        }
    }

    tracing::warn!(
        output_length = raw_output.len(),
        "Model output is not a recognizable report, returning raw output"
    );
    RecoveredReport::Unparsed(raw_output.to_string())
}

fn decode_direct(raw_output: &str) -> Option<ExtractedReport> {
    decode_report(raw_output)
}

fn decode_brace_span(raw_output: &str) -> Option<ExtractedReport> {
    let start = raw_output.find('{')?;
    let end = raw_output.rfind('}')?;
    if end < start {
        return None;
    }
    decode_report(&raw_output[start..=end])
}

/// Decode `candidate` only if it is a JSON object with the report's fields
fn decode_report(candidate: &str) -> Option<ExtractedReport> {
    let value: Value = serde_json::from_str(candidate).ok()?;
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}
