use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::extraction::ExtractionError;
use crate::llm_client::LlmError;

pub const MISSING_INPUT_MESSAGE: &str =
    "Please provide both resume and job description (via upload or text).";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Resume or job description is empty. Rendered as a warning, no model call is made.
    #[error("Please provide both resume and job description (via upload or text).")]
    MissingInput { notices: Vec<String> },

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body went past `MAX_UPLOAD_BYTES`.
    #[error("Upload exceeds the {limit} byte limit")]
    UploadTooLarge { limit: usize },

    #[error("Error reading PDF: {0}")]
    Extraction(#[from] ExtractionError),

    /// The model endpoint answered with a non-200 status.
    #[error("API Error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// The model endpoint could not be reached or the response could not be read.
    #[error("Transport error: {0}")]
    Transport(String),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Api { status, body } => AppError::Upstream { status, body },
            other => AppError::Transport(other.to_string()),
        }
    }
}

impl AppError {
    /// Maps a multipart read failure, keeping the body-limit case distinct.
    /// `limit` is the configured upload limit, quoted back to the user.
    pub fn from_multipart(err: MultipartError, limit: usize) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::UploadTooLarge { limit }
        } else {
            AppError::BadRequest(err.body_text())
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut extra = serde_json::Map::new();

        let (status, code, level, message) = match &self {
            AppError::MissingInput { notices } => {
                extra.insert("notices".to_string(), json!(notices));
                (
                    StatusCode::BAD_REQUEST,
                    "MISSING_INPUT",
                    "warning",
                    MISSING_INPUT_MESSAGE.to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", "error", msg.clone()),
            AppError::UploadTooLarge { limit } => {
                extra.insert("limit_bytes".to_string(), json!(limit));
                (
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "UPLOAD_TOO_LARGE",
                    "error",
                    self.to_string(),
                )
            }
            AppError::Extraction(e) => {
                tracing::warn!("PDF extraction failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "PDF_EXTRACTION_ERROR",
                    "error",
                    self.to_string(),
                )
            }
            AppError::Upstream { status, body } => {
                tracing::error!("Model API returned {status}: {body}");
                extra.insert("upstream_status".to_string(), json!(status));
                extra.insert("upstream_body".to_string(), json!(body));
                (
                    StatusCode::BAD_GATEWAY,
                    "UPSTREAM_ERROR",
                    "error",
                    self.to_string(),
                )
            }
            AppError::Transport(msg) => {
                tracing::error!("Model API transport error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "TRANSPORT_ERROR",
                    "error",
                    "An error occurred while contacting the analysis service".to_string(),
                )
            }
        };

        let mut error = serde_json::Map::new();
        error.insert("code".to_string(), json!(code));
        error.insert("level".to_string(), json!(level));
        error.insert("message".to_string(), json!(message));
        error.extend(extra);

        (status, Json(json!({ "error": error }))).into_response()
    }
}
