//! Plain-text extraction from uploaded contract documents
//!
//! Only PDF and DOCX are decoded. Any other declared media type is rejected
//! before the staged bytes are read.

use crate::model::{Document, DocumentFormat, ExtractedText};

pub mod docx;
pub mod error;
pub mod pdf;

pub use error::ExtractionError;

/// Extract plain text from a staged document.
///
/// Takes ownership of the document so its scratch file is removed when this
/// returns, whether extraction succeeded or not.
pub fn extract(document: Document) -> Result<ExtractedText, ExtractionError> {
    let Some(format) = DocumentFormat::from_media_type(document.media_type()) else {
        tracing::debug!(
            media_type = %document.media_type(),
            "Rejecting document with unsupported media type"
        );
        return Err(ExtractionError::UnsupportedFormat(
            document.media_type().to_string(),
        ));
    };

    let bytes = std::fs::read(document.path())
        .map_err(|e| ExtractionError::failed(format, format!("failed to read upload: {e}")))?;

    let text = match format {
        DocumentFormat::Pdf => pdf::extract_pdf(&bytes)?,
        DocumentFormat::Docx => docx::extract_docx(&bytes)?,
    };

    let extracted = ExtractedText { text, format };

    tracing::info!(
        format = %format,
        size_bytes = bytes.len(),
        extracted_chars = extracted.char_count(),
        "Extracted text from document"
    );

    Ok(extracted)
}

/// Run [`extract`] on the blocking thread pool.
///
/// Decoding is CPU-bound; a panic inside the decoder surfaces as
/// `ExtractionFailed` rather than taking down the worker.
pub async fn extract_text(document: Document) -> Result<ExtractedText, ExtractionError> {
    let Some(format) = DocumentFormat::from_media_type(document.media_type()) else {
        return Err(ExtractionError::UnsupportedFormat(
            document.media_type().to_string(),
        ));
    };

    match tokio::task::spawn_blocking(move || extract(document)).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(format = %format, error = %e, "Document extraction task failed");
            Err(ExtractionError::failed(
                format,
                format!("extraction task failed: {e}"),
            ))
        }
    }
}
