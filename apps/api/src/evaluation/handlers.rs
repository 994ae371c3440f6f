//! Axum route handlers for the ranking API.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::debug;

use crate::errors::AppError;
use crate::evaluation::models::BatchResponse;
use crate::evaluation::{evaluate_batch, MAX_RESUMES_PER_REQUEST};
use crate::extraction::SourceDocument;
use crate::state::AppState;

const JOB_DESCRIPTION_FIELD: &str = "job_description";
const RESUMES_FIELD: &str = "resumes";

/// POST /evaluate
///
/// Multipart form: one `job_description` text field and 1–20 `resumes` files
/// (PDF, DOCX or TXT). Returns every candidate ranked by overall score.
pub async fn handle_evaluate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<BatchResponse>, AppError> {
    let mut job_description = String::new();
    let mut documents = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(JOB_DESCRIPTION_FIELD) => job_description = field.text().await?,
            Some(RESUMES_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let raw_bytes = field.bytes().await?;
                debug!("Received resume '{filename}' ({} bytes)", raw_bytes.len());
                documents.push(SourceDocument::new(filename, raw_bytes));
            }
            _ => {}
        }
    }

    validate_request(&job_description, documents.len())?;

    let response = evaluate_batch(&state.orchestrator, documents, &job_description).await?;
    Ok(Json(response))
}

fn validate_request(job_description: &str, resume_count: usize) -> Result<(), AppError> {
    if job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Job description cannot be empty".to_string(),
        ));
    }
    if resume_count == 0 {
        return Err(AppError::Validation(
            "At least one resume file is required".to_string(),
        ));
    }
    if resume_count > MAX_RESUMES_PER_REQUEST {
        return Err(AppError::Validation(format!(
            "Maximum {MAX_RESUMES_PER_REQUEST} resumes can be evaluated at once"
        )));
    }
    Ok(())
}
