//! Error types for document text extraction

use thiserror::Error;

use crate::model::DocumentFormat;

/// Error type for document text extraction
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExtractionError {
    /// Declared media type is neither PDF nor DOCX; nothing was decoded
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Decoding failed (corrupt, encrypted or unreadable document)
    #[error("Failed to extract text from {format} document: {reason}")]
    ExtractionFailed {
        format: DocumentFormat,
        reason: String,
    },
}

impl ExtractionError {
    pub fn failed(format: DocumentFormat, cause: impl std::fmt::Display) -> Self {
        ExtractionError::ExtractionFailed {
            format,
            reason: cause.to_string(),
        }
    }
}
