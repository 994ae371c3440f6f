//! Text extraction — turns an uploaded resume (filename + raw bytes) into plain text.
//!
//! Dispatch is by case-insensitive file extension: `.pdf`, `.docx`, `.txt`.
//! Output is always whitespace-trimmed. An empty string is a valid result; the
//! orchestrator decides what "nothing extracted" means for a candidate.
//!
//! Decoding is CPU-bound. Async callers go through `extract_text_blocking`, which
//! runs the decoder inside `tokio::task::spawn_blocking`.

mod docx;

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file format: {filename}. Please upload PDF, DOCX, or TXT files.")]
    UnsupportedFormat { filename: String },

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to extract text from DOCX: {0}")]
    Docx(String),

    #[error("Text extraction worker failed: {0}")]
    Worker(String),
}

/// One uploaded resume. Immutable; dropped once its text has been extracted.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub filename: String,
    pub raw_bytes: Bytes,
}

impl SourceDocument {
    pub fn new(filename: impl Into<String>, raw_bytes: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            raw_bytes: raw_bytes.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".pdf") {
            Some(Self::Pdf)
        } else if lower.ends_with(".docx") {
            Some(Self::Docx)
        } else if lower.ends_with(".txt") {
            Some(Self::Txt)
        } else {
            None
        }
    }
}

/// Extracts trimmed plain text from a document, dispatching on its extension.
pub fn extract_text(filename: &str, raw_bytes: &[u8]) -> Result<String, ExtractionError> {
    let format =
        DocumentFormat::from_filename(filename).ok_or_else(|| ExtractionError::UnsupportedFormat {
            filename: filename.to_string(),
        })?;

    match format {
        DocumentFormat::Pdf => extract_pdf(raw_bytes),
        DocumentFormat::Docx => docx::extract_docx(raw_bytes),
        DocumentFormat::Txt => Ok(String::from_utf8_lossy(raw_bytes).trim().to_string()),
    }
}

/// Runs `extract_text` on the blocking pool. A panicking decoder becomes
/// `ExtractionError::Worker` instead of tearing down the caller's task.
pub async fn extract_text_blocking(document: &SourceDocument) -> Result<String, ExtractionError> {
    let filename = document.filename.clone();
    let raw_bytes = document.raw_bytes.clone();
    tokio::task::spawn_blocking(move || extract_text(&filename, &raw_bytes))
        .await
        .map_err(|e| ExtractionError::Worker(e.to_string()))?
}

/// pdf-extract panics on some malformed inputs, so the call is unwound here and
/// reported like any other decoder failure.
fn extract_pdf(raw_bytes: &[u8]) -> Result<String, ExtractionError> {
    match std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem(raw_bytes)) {
        Ok(Ok(text)) => Ok(text.trim().to_string()),
        Ok(Err(e)) => Err(ExtractionError::Pdf(e.to_string())),
        Err(_) => Err(ExtractionError::Pdf("PDF decoder panicked".to_string())),
    }
}
