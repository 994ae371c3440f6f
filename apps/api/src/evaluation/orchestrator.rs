//! Evaluation orchestrator — one independent task per candidate, joined before ranking.
//!
//! Per candidate: extract text → reject empty → build prompt → one oracle call
//! (bounded by a semaphore and a timeout) → parse. Every failure along the way is
//! turned into a degraded record inside the task, so the orchestrator always
//! returns exactly one result per submitted document, in submission order.
//!
//! Tasks live in a `JoinSet`; dropping the batch future (client disconnect) aborts
//! whatever is still running.

use std::sync::Arc;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

use crate::evaluation::models::EvaluationResult;
use crate::evaluation::parse::parse_evaluation;
use crate::evaluation::prompts::build_evaluation_prompt;
use crate::extraction::{extract_text_blocking, ExtractionError, SourceDocument};
use crate::llm_client::{LlmError, Oracle};

const UNKNOWN_CANDIDATE: &str = "Unknown";

/// Why a single candidate could not be evaluated. Never escapes its task.
#[derive(Debug, Error)]
pub enum CandidateError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("Empty resume")]
    EmptyText,

    #[error(transparent)]
    Oracle(#[from] LlmError),

    #[error("Evaluation timed out after {0}s")]
    Timeout(u64),

    #[error("Failed to parse AI response")]
    ResponseParse(#[source] serde_json::Error),

    #[error("Evaluation task failed")]
    TaskFailed,
}

#[derive(Debug, Clone, Copy)]
pub struct EvaluationSettings {
    /// Budget for one oracle call, retries included.
    pub timeout: Duration,
    /// Oracle calls allowed in flight at once within a batch.
    pub max_concurrency: usize,
}

#[derive(Clone)]
pub struct Orchestrator {
    oracle: Arc<dyn Oracle>,
    settings: EvaluationSettings,
}

impl Orchestrator {
    pub fn new(oracle: Arc<dyn Oracle>, settings: EvaluationSettings) -> Self {
        Self { oracle, settings }
    }

    /// Evaluates every document against `job_description`.
    ///
    /// All tasks are spawned before any is awaited. The returned vector has the
    /// same length and order as `documents`, independent of completion order.
    pub async fn evaluate_all(
        &self,
        documents: Vec<SourceDocument>,
        job_description: &str,
    ) -> Vec<EvaluationResult> {
        let job_description: Arc<str> = Arc::from(job_description);
        let permits = Arc::new(Semaphore::new(self.settings.max_concurrency.max(1)));
        let timeout = self.settings.timeout;

        let filenames: Vec<String> = documents.iter().map(|d| d.filename.clone()).collect();
        let mut tasks = JoinSet::new();

        for (index, document) in documents.into_iter().enumerate() {
            let oracle = Arc::clone(&self.oracle);
            let job_description = Arc::clone(&job_description);
            let permits = Arc::clone(&permits);
            tasks.spawn(async move {
                let result = evaluate_candidate(
                    oracle.as_ref(),
                    &document,
                    &job_description,
                    &permits,
                    timeout,
                )
                .await;
                (index, result)
            });
        }

        let mut slots: Vec<Option<EvaluationResult>> = filenames.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => error!("Candidate evaluation task failed: {e}"),
            }
        }

        slots
            .into_iter()
            .zip(filenames)
            .map(|(slot, filename)| {
                slot.unwrap_or_else(|| degraded_record(&filename, &CandidateError::TaskFailed))
            })
            .collect()
    }
}

/// Runs one candidate end to end. Infallible: failures become degraded records.
async fn evaluate_candidate(
    oracle: &dyn Oracle,
    document: &SourceDocument,
    job_description: &str,
    permits: &Semaphore,
    timeout: Duration,
) -> EvaluationResult {
    let started = Instant::now();
    debug!(filename = %document.filename, "Evaluating candidate");

    match run_candidate(oracle, document, job_description, permits, timeout).await {
        Ok(result) => {
            info!(
                candidate = %result.candidate_name,
                score = result.overall_score,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Candidate evaluated"
            );
            result
        }
        Err(e) => {
            warn!(
                filename = %document.filename,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Candidate degraded: {e}"
            );
            degraded_record(&document.filename, &e)
        }
    }
}

async fn run_candidate(
    oracle: &dyn Oracle,
    document: &SourceDocument,
    job_description: &str,
    permits: &Semaphore,
    timeout: Duration,
) -> Result<EvaluationResult, CandidateError> {
    let resume_text = extract_text_blocking(document).await?;
    if resume_text.trim().is_empty() {
        return Err(CandidateError::EmptyText);
    }

    let name = candidate_name(&document.filename);
    let prompt = build_evaluation_prompt(job_description, &name, &resume_text);

    let raw = {
        let _permit = permits
            .acquire()
            .await
            .map_err(|_| CandidateError::TaskFailed)?;
        tokio::time::timeout(timeout, oracle.evaluate(&prompt))
            .await
            .map_err(|_| CandidateError::Timeout(timeout.as_secs()))??
    };

    parse_evaluation(&raw, &name).map_err(CandidateError::ResponseParse)
}

/// Filename without its final extension; `"Unknown"` when nothing is left.
pub fn candidate_name(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => UNKNOWN_CANDIDATE.to_string(),
    }
}

/// Builds the zero-score record for a failed candidate.
///
/// Failures before the oracle is consulted are labelled with the full filename,
/// so the uploader can tell which file was rejected.
fn degraded_record(filename: &str, error: &CandidateError) -> EvaluationResult {
    let message = error.to_string();
    match error {
        CandidateError::Extraction(_) | CandidateError::TaskFailed => EvaluationResult::degraded(
            display_name(filename),
            message.clone(),
            "Resume could not be read",
            message,
        ),
        CandidateError::EmptyText => EvaluationResult::degraded(
            display_name(filename),
            "Resume file was empty or could not be read.",
            "Resume could not be read",
            message,
        ),
        CandidateError::ResponseParse(_) => EvaluationResult::degraded(
            candidate_name(filename),
            "The AI was unable to properly evaluate this resume.",
            "Resume could not be properly evaluated",
            message,
        ),
        CandidateError::Oracle(_) | CandidateError::Timeout(_) => EvaluationResult::degraded(
            candidate_name(filename),
            format!("Error during evaluation: {message}"),
            "Evaluation failed due to an error",
            message,
        ),
    }
}

fn display_name(filename: &str) -> String {
    if filename.is_empty() {
        UNKNOWN_CANDIDATE.to_string()
    } else {
        filename.to_string()
    }
}
