//! PDF text extraction.
//!
//! Wraps the `pdf-extract` crate. Failures here never abort an analysis: callers turn an
//! `ExtractionError` into a user-visible notice and fall back to pasted text.
//! `NoText` is a readable PDF without a text layer (typically a scan), not a read failure.

use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("the uploaded file is empty")]
    Empty,

    #[error("the uploaded file is not a PDF")]
    NotPdf,

    #[error("{0}")]
    Decode(String),

    #[error("the PDF could not be decoded")]
    Panicked,

    #[error("the PDF contains no extractable text")]
    NoText,

    #[error("extraction task failed: {0}")]
    Task(String),
}

/// Extracts the text of every page, in page order, trimmed of surrounding whitespace.
///
/// `pdf-extract` is known to panic on some malformed documents, so the call is isolated
/// with `catch_unwind` and a panic is reported as an ordinary decode failure.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractionError> {
    if bytes.is_empty() {
        return Err(ExtractionError::Empty);
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractionError::NotPdf);
    }

    let text = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(bytes)
    }))
    .map_err(|_| ExtractionError::Panicked)?
    .map_err(|e| ExtractionError::Decode(e.to_string()))?;

    let text = text.trim();
    if text.is_empty() {
        return Err(ExtractionError::NoText);
    }

    debug!("Extracted {} chars from {} byte PDF", text.len(), bytes.len());
    Ok(text.to_string())
}

/// Runs `extract_pdf_text` on the blocking pool; PDF decoding is CPU-bound.
pub async fn extract_pdf_text_blocking(bytes: Bytes) -> Result<String, ExtractionError> {
    tokio::task::spawn_blocking(move || extract_pdf_text(&bytes))
        .await
        .map_err(|e| ExtractionError::Task(e.to_string()))?
}
