//! REST API endpoints for contract upload and analysis

use std::io::Write;

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, post, web};
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use utoipa::{OpenApi, ToSchema};

use crate::api::error::{ApiError, ErrorResponse};
use crate::model::{
    AnalysisReport, ContractRiskReport, DegradedReport, Document, DocumentFormat, RiskClause,
    UploadConfig,
};
use crate::service::ContractAnalysisService;
use crate::service::extraction;

/// Multipart field carrying the document
const FILE_FIELD: &str = "file";

/// Multipart upload form
#[derive(Debug, ToSchema)]
#[allow(dead_code)] // Schema only
pub struct UploadForm {
    /// PDF or DOCX document
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}

/// Text extracted from an uploaded document
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub contract_text: String,
}

/// Request body for contract analysis
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    /// Contract text; missing is treated as empty
    #[serde(default)]
    pub contract_text: Option<String>,
}

/// Upload a contract document and return its plain text
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Text extracted successfully", body = UploadResponse),
        (status = 400, description = "Missing file or unsupported file type", body = ErrorResponse),
        (status = 413, description = "File exceeds the upload limit", body = ErrorResponse),
        (status = 500, description = "File could not be processed", body = ErrorResponse)
    ),
    tag = "contracts"
)]
#[post("/upload")]
pub async fn upload(
    config: web::Data<UploadConfig>,
    mut payload: Multipart,
) -> Result<HttpResponse, ApiError> {
    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            // drain so the next field can be read
            while field.try_next().await.map_err(multipart_error)?.is_some() {}
            continue;
        }

        let media_type = field
            .content_type()
            .map(|m| m.essence_str().to_string())
            .unwrap_or_default();

        // Reject before any bytes are staged
        if DocumentFormat::from_media_type(&media_type).is_none() {
            return Err(ApiError::UnsupportedFormat(media_type));
        }

        let document = stage_upload(field, media_type, config.max_bytes).await?;
        let extracted = extraction::extract_text(document).await?;

        return Ok(HttpResponse::Ok().json(UploadResponse {
            contract_text: extracted.text,
        }));
    }

    Err(ApiError::MissingFile)
}

/// Stream a multipart field into a scratch file, enforcing the size limit.
///
/// The scratch file is removed on every early return.
async fn stage_upload(
    mut field: Field,
    media_type: String,
    max_bytes: u64,
) -> Result<Document, ApiError> {
    let mut file = NamedTempFile::new()
        .map_err(|e| ApiError::Internal(format!("Failed to create scratch file: {e}")))?;
    let mut written: u64 = 0;

    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        written += chunk.len() as u64;
        if written > max_bytes {
            return Err(ApiError::PayloadTooLarge(max_bytes));
        }
        file.write_all(&chunk)
            .map_err(|e| ApiError::Internal(format!("Failed to write scratch file: {e}")))?;
    }

    tracing::debug!(
        media_type = %media_type,
        size_bytes = written,
        "Staged uploaded document"
    );

    Ok(Document::new(media_type, file))
}

fn multipart_error(e: actix_multipart::MultipartError) -> ApiError {
    ApiError::BadRequest(format!("Invalid multipart payload: {e}"))
}

/// Analyze contract text for risky clauses
#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    responses(
        (status = 200, description = "Risk report, or the raw model output when it could not be parsed", body = AnalysisReport),
        (status = 400, description = "Contract text is too short or the body is malformed", body = ErrorResponse),
        (status = 502, description = "LLM call failed", body = ErrorResponse)
    ),
    tag = "contracts"
)]
#[post("/analyze")]
pub async fn analyze(
    service: web::Data<ContractAnalysisService>,
    request: web::Json<AnalyzeRequest>,
) -> Result<HttpResponse, ApiError> {
    let contract_text = request.into_inner().contract_text.unwrap_or_default();

    let report = service.analyze(&contract_text).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// JSON extractor settings: size limit and error rendering
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into())
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contract Checker API",
        description = "Extracts contract text from documents and flags risky clauses. Not legal advice."
    ),
    paths(
        upload,
        analyze,
        crate::api::health::liveness,
        crate::api::health::readiness
    ),
    components(schemas(
        UploadForm,
        UploadResponse,
        AnalyzeRequest,
        AnalysisReport,
        ContractRiskReport,
        DegradedReport,
        RiskClause,
        ErrorResponse,
        crate::api::health::HealthStatus,
        crate::api::health::ReadinessStatus
    )),
    tags(
        (name = "contracts", description = "Contract upload and risk analysis"),
        (name = "health", description = "Liveness and readiness probes")
    )
)]
pub struct ApiDoc;

/// Configure contract routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload).service(analyze);
}
