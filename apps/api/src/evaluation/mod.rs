// Resume ranking pipeline.
// Flow: extraction (per document) → orchestrator (oracle fan-out) → ranking → aggregate.
// All oracle calls go through the `Oracle` trait — no direct Gemini calls here.

pub mod aggregate;
pub mod handlers;
pub mod models;
pub mod orchestrator;
pub mod parse;
pub mod prompts;
pub mod ranking;

use anyhow::anyhow;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::aggregate::build_batch_response;
use crate::evaluation::models::BatchResponse;
use crate::evaluation::orchestrator::Orchestrator;
use crate::evaluation::ranking::rank_evaluations;
use crate::extraction::SourceDocument;

/// Upper bound on resumes accepted in one request.
pub const MAX_RESUMES_PER_REQUEST: usize = 20;

/// Evaluates, ranks and packages one batch of resumes.
///
/// Per-candidate failures are already degraded records by the time they get here;
/// the only error is a broken one-result-per-document invariant.
pub async fn evaluate_batch(
    orchestrator: &Orchestrator,
    documents: Vec<SourceDocument>,
    job_description: &str,
) -> Result<BatchResponse, AppError> {
    let batch_id = Uuid::new_v4();
    let submitted = documents.len();

    async move {
        info!("Evaluating {submitted} resumes");
        let evaluations = orchestrator.evaluate_all(documents, job_description).await;
        if evaluations.len() != submitted {
            return Err(AppError::Internal(anyhow!(
                "expected {submitted} evaluations, got {}",
                evaluations.len()
            )));
        }

        let degraded = evaluations.iter().filter(|e| e.is_degraded()).count();
        let response = build_batch_response(rank_evaluations(evaluations), job_description);
        info!(
            "Batch complete: {} candidates, {} degraded",
            response.total_candidates, degraded
        );
        Ok(response)
    }
    .instrument(info_span!("batch", %batch_id))
    .await
}
