use crate::evaluation::models::{BatchResponse, EvaluationResult};

/// Characters of the job description echoed back in the response.
pub const PREVIEW_CHARS: usize = 200;
const ELLIPSIS: &str = "...";

/// The job description unchanged when short enough, otherwise its first
/// `PREVIEW_CHARS` characters followed by `...`.
pub fn job_description_preview(job_description: &str) -> String {
    match job_description.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &job_description[..cut]),
        None => job_description.to_string(),
    }
}

/// Bundles ranked evaluations with the summary metadata of the batch.
pub fn build_batch_response(
    ranked: Vec<EvaluationResult>,
    job_description: &str,
) -> BatchResponse {
    BatchResponse {
        total_candidates: ranked.len(),
        job_description_preview: job_description_preview(job_description),
        evaluations: ranked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_description_is_verbatim() {
        let jd = "Backend engineer, Rust + Postgres.";
        assert_eq!(job_description_preview(jd), jd);
    }

    #[test]
    fn test_exactly_200_chars_is_verbatim() {
        let jd = "x".repeat(200);
        assert_eq!(job_description_preview(&jd), jd);
    }

    #[test]
    fn test_long_description_is_truncated_with_ellipsis() {
        let jd = format!("{}{}", "a".repeat(200), "tail that should vanish");
        let preview = job_description_preview(&jd);
        assert_eq!(preview, format!("{}...", "a".repeat(200)));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let jd = "é".repeat(250);
        let preview = job_description_preview(&jd);
        assert_eq!(preview.chars().count(), 203);
        assert!(preview.starts_with(&"é".repeat(200)));
    }

    #[test]
    fn test_batch_response_counts_candidates() {
        let ranked = vec![
            EvaluationResult::degraded("a.pdf", "x", "y", "z"),
            EvaluationResult::degraded("b.pdf", "x", "y", "z"),
        ];
        let response = build_batch_response(ranked, "Data engineer");
        assert_eq!(response.total_candidates, 2);
        assert_eq!(response.job_description_preview, "Data engineer");
        assert_eq!(response.evaluations[1].candidate_name, "b.pdf");
    }
}
