//! Unified API error handling
//!
//! Every failure is rendered as the same JSON body: a short human-readable
//! message, a stable error code, optional details and a request ID.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::analysis::AnalysisError;
use crate::service::extraction::ExtractionError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
    /// Stable error code
    pub code: String,
    /// Underlying cause, when it is safe to show
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Upload carried no `file` field (400)
    #[error("No file uploaded")]
    MissingFile,

    /// Declared media type is not PDF or DOCX (400)
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    /// Upload exceeded the configured size limit (413)
    #[error("Upload exceeds {0} bytes")]
    PayloadTooLarge(u64),

    /// Document could not be decoded (500)
    #[error("File processing failed: {0}")]
    ExtractionFailed(String),

    /// Contract text below the minimum length (400)
    #[error("Contract text is too short: {length} characters, at least {minimum} required")]
    TextTooShort { length: usize, minimum: usize },

    /// Malformed request body (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// LLM call failed (502)
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::MissingFile => "missing_file",
            ApiError::UnsupportedFormat(_) => "unsupported_format",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::ExtractionFailed(_) => "extraction_failed",
            ApiError::TextTooShort { .. } => "text_too_short",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::AnalysisFailed(_) => "analysis_failed",
            ApiError::Internal(_) => "internal_error",
        }
    }

    fn public_message(&self) -> &'static str {
        match self {
            ApiError::MissingFile => "No file uploaded.",
            ApiError::UnsupportedFormat(_) => "Unsupported file type.",
            ApiError::PayloadTooLarge(_) => "Uploaded file is too large.",
            ApiError::ExtractionFailed(_) => "File processing failed.",
            ApiError::TextTooShort { .. } => "Contract text is too short.",
            ApiError::BadRequest(_) => "Invalid request.",
            ApiError::AnalysisFailed(_) => "Analysis failed.",
            ApiError::Internal(_) => "Internal server error.",
        }
    }

    /// Extraction and internal causes stay in the logs
    fn details(&self) -> Option<String> {
        match self {
            ApiError::UnsupportedFormat(media_type) if !media_type.is_empty() => {
                Some(format!("Received {media_type}; expected a PDF or DOCX file"))
            }
            ApiError::PayloadTooLarge(limit) => {
                Some(format!("Maximum upload size is {limit} bytes"))
            }
            ApiError::TextTooShort { length, minimum } => Some(format!(
                "Received {length} characters; at least {minimum} are required"
            )),
            ApiError::BadRequest(msg) | ApiError::AnalysisFailed(msg) => Some(msg.clone()),
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingFile
            | ApiError::UnsupportedFormat(_)
            | ApiError::TextTooShort { .. }
            | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::AnalysisFailed(_) => StatusCode::BAD_GATEWAY,
            ApiError::ExtractionFailed(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.code();

        if status.is_server_error() {
            tracing::error!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        } else {
            tracing::warn!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API request rejected"
            );
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.public_message().to_string(),
            code: error_type.to_string(),
            details: self.details(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<ExtractionError> for ApiError {
    fn from(err: ExtractionError) -> Self {
        match err {
            ExtractionError::UnsupportedFormat(media_type) => {
                ApiError::UnsupportedFormat(media_type)
            }
            e @ ExtractionError::ExtractionFailed { .. } => {
                ApiError::ExtractionFailed(e.to_string())
            }
        }
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::TextTooShort { length, minimum } => {
                ApiError::TextTooShort { length, minimum }
            }
            AnalysisError::OracleCallFailed(e) => ApiError::AnalysisFailed(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DocumentFormat;
    use crate::service::llm::OracleError;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingFile.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::UnsupportedFormat("image/png".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::TextTooShort {
                length: 10,
                minimum: 50
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::ExtractionFailed("corrupt".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::AnalysisFailed("timeout".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::PayloadTooLarge(10).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_extraction_error_conversion() {
        let api: ApiError = ExtractionError::UnsupportedFormat("image/png".into()).into();
        assert!(matches!(api, ApiError::UnsupportedFormat(ref t) if t == "image/png"));

        let api: ApiError = ExtractionError::failed(DocumentFormat::Docx, "bad zip").into();
        assert!(matches!(api, ApiError::ExtractionFailed(ref msg) if msg.contains("bad zip")));
    }

    #[test]
    fn test_analysis_error_conversion() {
        let cause = OracleError::Request("401 Unauthorized".into());
        let api = ApiError::from(AnalysisError::OracleCallFailed(cause));
        assert!(matches!(api, ApiError::AnalysisFailed(ref msg) if msg.contains("401")));
    }

    #[actix_web::test]
    async fn test_error_body_hides_extraction_cause() {
        let error = ApiError::ExtractionFailed("zip: invalid central directory".into());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "File processing failed.");
        assert_eq!(json["code"], "extraction_failed");
        assert!(json.get("details").is_none());
        assert!(Uuid::parse_str(json["request_id"].as_str().unwrap()).is_ok());
    }

    #[actix_web::test]
    async fn test_error_body_includes_analysis_details() {
        let error = ApiError::AnalysisFailed("LLM request timed out after 60s".into());
        let body = to_bytes(error.error_response().into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["error"], "Analysis failed.");
        assert_eq!(json["details"], "LLM request timed out after 60s");
    }
}
