//! PDF text-layer extraction

use std::panic::{self, AssertUnwindSafe};

use crate::model::DocumentFormat;
use crate::service::extraction::ExtractionError;

/// The `%PDF-` marker must appear within this many leading bytes
const HEADER_SEARCH_WINDOW: usize = 1024;

/// Extract the text layer of every page, in document order.
///
/// Scanned PDFs without a text layer yield little or no text; the analyze
/// step's minimum length check is what rejects those.
pub fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractionError> {
    let window = &bytes[..bytes.len().min(HEADER_SEARCH_WINDOW)];
    if !window.windows(5).any(|w| w == b"%PDF-") {
        return Err(ExtractionError::failed(
            DocumentFormat::Pdf,
            "missing %PDF header",
        ));
    }

    // pdf-extract panics on some malformed inputs instead of returning an error
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }));

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::failed(DocumentFormat::Pdf, e)),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown decoder panic".to_string());
            Err(ExtractionError::failed(
                DocumentFormat::Pdf,
                format!("decoder panicked: {message}"),
            ))
        }
    }
}
