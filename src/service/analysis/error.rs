//! Error types for contract analysis

use thiserror::Error;

use crate::service::llm::OracleError;

/// Error type for contract analysis
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalysisError {
    /// Input rejected before any LLM call
    #[error("Contract text is too short: {length} characters, at least {minimum} required")]
    TextTooShort { length: usize, minimum: usize },

    #[error("LLM analysis failed: {0}")]
    OracleCallFailed(#[from] OracleError),
}
