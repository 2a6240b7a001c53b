//! Contract risk analysis service using LLM
//!
//! Validates the input, builds the prompt, calls the oracle once and turns
//! whatever comes back into a report. Malformed model output never fails a
//! request; it degrades to the raw-output report shape.

use std::sync::Arc;
use std::time::Instant;

use crate::model::AnalysisReport;
use crate::service::analysis::assembler::assemble;
use crate::service::analysis::prompts::compose;
use crate::service::analysis::recovery::{RecoveredReport, recover};
use crate::service::analysis::validation::validate_report;
use crate::service::llm::AnalysisOracle;

pub mod assembler;
pub mod error;
pub mod prompts;
pub mod recovery;
pub mod validation;

pub use error::AnalysisError;

/// Shorter input cannot yield a meaningful analysis
pub const MIN_CONTRACT_TEXT_CHARS: usize = 50;

/// Service for analyzing contract text for risky clauses
pub struct ContractAnalysisService {
    oracle: Arc<dyn AnalysisOracle>,
}

impl ContractAnalysisService {
    pub fn new(oracle: Arc<dyn AnalysisOracle>) -> Self {
        Self { oracle }
    }

    /// Model used by the underlying oracle
    pub fn model(&self) -> &str {
        self.oracle.model()
    }

    /// Analyze contract text and produce a risk report
    pub async fn analyze(&self, contract_text: &str) -> Result<AnalysisReport, AnalysisError> {
        validate_length(contract_text)?;

        let start_time = Instant::now();
        let prompt = compose(contract_text);

        let raw_output = self.oracle.complete(prompt.system, &prompt.user).await?;

        let recovered = recover(&raw_output);
        let strategy = match &recovered {
            RecoveredReport::Structured { strategy, .. } => strategy.as_str(),
            RecoveredReport::Unparsed(_) => "degraded",
        };

        let report = assemble(recovered);

        if let AnalysisReport::Structured(ref structured) = report {
            let validation = validate_report(structured, contract_text);
            for warning in &validation.warnings {
                tracing::warn!(warning = %warning, "Risk report quality warning");
            }
        }

        let clause_count = match &report {
            AnalysisReport::Structured(r) => r.risky_clauses.len(),
            AnalysisReport::Degraded(_) => 0,
        };

        tracing::info!(
            model = %self.oracle.model(),
            recovery = strategy,
            risky_clauses = clause_count,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Contract analysis complete"
        );

        Ok(report)
    }
}

/// Reject text below [`MIN_CONTRACT_TEXT_CHARS`] characters
pub fn validate_length(contract_text: &str) -> Result<(), AnalysisError> {
    let length = contract_text.chars().count();
    if length < MIN_CONTRACT_TEXT_CHARS {
        tracing::debug!(
            length = length,
            "Rejecting contract text below minimum length"
        );
        return Err(AnalysisError::TextTooShort {
            length,
            minimum: MIN_CONTRACT_TEXT_CHARS,
        });
    }
    Ok(())
}
