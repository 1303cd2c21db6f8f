//! Axum route handlers for the Analysis API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::analysis::service::{run_analysis, AnalysisInputs, AnalysisReport};
use crate::errors::AppError;
use crate::extraction::{extract_pdf_text_blocking, ExtractionError};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub resume_text: String,
    #[serde(default)]
    pub job_description_text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    /// Set when the PDF was readable but had no text layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Which input a multipart field feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Resume,
    JobDescription,
}

impl Slot {
    fn label(self) -> &'static str {
        match self {
            Slot::Resume => "resume",
            Slot::JobDescription => "job description",
        }
    }
}

/// Text gathered for one slot. A PDF that yields text wins over pasted text.
#[derive(Debug, Default)]
struct SlotText {
    extracted: Option<String>,
    pasted: String,
}

impl SlotText {
    fn resolve(self) -> String {
        self.extracted.unwrap_or(self.pasted)
    }
}

/// Notice for a PDF that opened fine but has no text layer, e.g. a scan.
fn no_text_notice(label: &str) -> String {
    format!("The {label} PDF has no extractable text (it may be a scanned image); paste the text instead.")
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Analyzes pasted resume and job description text.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    let inputs = AnalysisInputs {
        resume: request.resume_text,
        job_description: request.job_description_text,
        notices: vec![],
    };

    let report = run_analysis(inputs, state.generator.as_ref(), &state.config.markers).await?;
    Ok(Json(report))
}

/// POST /api/v1/analyze/upload
///
/// Multipart form with optional `resume_pdf`, `job_description_pdf`, `resume_text` and
/// `job_description_text` fields. PDFs that fail to extract become notices in the report
/// and the pasted text for that slot is used instead.
pub async fn handle_analyze_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let limit = state.config.max_upload_bytes;
    let read_err = |e: MultipartError| AppError::from_multipart(e, limit);
    let mut resume = SlotText::default();
    let mut job_description = SlotText::default();
    let mut notices = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(read_err)? {
        let name = field.name().unwrap_or_default().to_string();
        let (slot, is_file) = match name.as_str() {
            "resume_pdf" => (Slot::Resume, true),
            "job_description_pdf" => (Slot::JobDescription, true),
            "resume_text" => (Slot::Resume, false),
            "job_description_text" => (Slot::JobDescription, false),
            _ => continue,
        };
        let target = match slot {
            Slot::Resume => &mut resume,
            Slot::JobDescription => &mut job_description,
        };

        if is_file {
            let bytes = field.bytes().await.map_err(read_err)?;
            // An untouched file input still submits an empty part.
            if bytes.is_empty() {
                continue;
            }
            match extract_pdf_text_blocking(bytes).await {
                Ok(text) => target.extracted = Some(text),
                Err(ExtractionError::NoText) => {
                    info!("{} PDF has no text layer", slot.label());
                    notices.push(no_text_notice(slot.label()));
                }
                Err(e) => {
                    warn!("Could not read {} PDF: {e}", slot.label());
                    notices.push(format!("Error reading {} PDF: {e}", slot.label()));
                }
            }
        } else {
            target.pasted = field.text().await.map_err(read_err)?;
        }
    }

    let inputs = AnalysisInputs {
        resume: resume.resolve(),
        job_description: job_description.resolve(),
        notices,
    };

    let report = run_analysis(inputs, state.generator.as_ref(), &state.config.markers).await?;
    Ok(Json(report))
}

/// POST /api/v1/extract
///
/// Extracts the text of a single uploaded PDF (`file` field). The page calls this when a
/// PDF is picked, to preview the text in the matching text area.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let limit = state.config.max_upload_bytes;
    let read_err = |e: MultipartError| AppError::from_multipart(e, limit);

    while let Some(field) = multipart.next_field().await.map_err(read_err)? {
        if field.name() != Some("file") {
            continue;
        }
        let bytes = field.bytes().await.map_err(read_err)?;

        return match extract_pdf_text_blocking(bytes).await {
            Ok(text) => Ok(Json(ExtractResponse { text, notice: None })),
            Err(ExtractionError::NoText) => Ok(Json(ExtractResponse {
                text: String::new(),
                notice: Some(no_text_notice("uploaded")),
            })),
            Err(e) => Err(e.into()),
        };
    }

    Err(AppError::BadRequest("missing 'file' field".to_string()))
}
