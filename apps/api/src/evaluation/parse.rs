//! Normalizes free-text oracle output into an `EvaluationResult`.

use std::borrow::Cow;

use crate::evaluation::models::EvaluationResult;

const FENCE: &str = "```";

/// Drops every line that opens or closes a markdown code fence when the response
/// starts with one. Content between the fences is kept as-is.
fn strip_code_fences(text: &str) -> Cow<'_, str> {
    let text = text.trim();
    if !text.starts_with(FENCE) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.lines()
            .filter(|line| !line.trim().starts_with(FENCE))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Parses an oracle response for `candidate_name`.
///
/// The name is always the service's own; any `rank` or `error` the oracle
/// invents is discarded.
pub fn parse_evaluation(
    raw: &str,
    candidate_name: &str,
) -> Result<EvaluationResult, serde_json::Error> {
    let cleaned = strip_code_fences(raw);
    let mut result: EvaluationResult = serde_json::from_str(&cleaned)?;
    result.candidate_name = candidate_name.to_string();
    result.rank = 0;
    result.error = None;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::models::Recommendation;

    const RESPONSE: &str = r#"{
        "overall_score": 82,
        "skills_match": {"score": 90, "matched_skills": ["Rust", "Tokio"], "missing_skills": ["Kafka"]},
        "experience_match": {"score": 80, "summary": "Six years of backend work."},
        "education_match": {"score": 70, "summary": "BSc Computer Science."},
        "certifications": {"score": 40, "found": [], "recommended": ["CKA"]},
        "strengths": ["Async Rust", "Observability"],
        "weaknesses": ["No streaming experience"],
        "overall_assessment": "Strong systems engineer with minor gaps.",
        "recommendation": "STRONG_MATCH"
    }"#;

    #[test]
    fn test_strip_code_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_code_fences_no_fences() {
        let input = "  {\"key\": \"value\"}\n";
        assert!(matches!(strip_code_fences(input), Cow::Borrowed(_)));
        assert_eq!(strip_code_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_parse_full_response() {
        let result = parse_evaluation(RESPONSE, "jane_doe").unwrap();
        assert_eq!(result.candidate_name, "jane_doe");
        assert_eq!(result.overall_score, 82);
        assert_eq!(result.recommendation, Recommendation::StrongMatch);
        let skills = result.skills_match.unwrap();
        assert_eq!(skills.matched_skills, vec!["Rust", "Tokio"]);
        assert_eq!(result.certifications.unwrap().recommended, vec!["CKA"]);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_fenced_response() {
        let fenced = format!("```json\n{RESPONSE}\n```");
        let result = parse_evaluation(&fenced, "jane_doe").unwrap();
        assert_eq!(result.overall_score, 82);
    }

    #[test]
    fn test_oracle_supplied_name_rank_and_error_are_overwritten() {
        let raw = r#"{"candidate_name": "Someone Else", "rank": 7, "error": "none",
                      "overall_score": 10, "recommendation": "NO_MATCH"}"#;
        let result = parse_evaluation(raw, "bob").unwrap();
        assert_eq!(result.candidate_name, "bob");
        assert_eq!(result.rank, 0);
        assert!(result.error.is_none());
    }

    #[test]
    fn test_nulls_in_response_keep_the_score() {
        let raw = r#"{"overall_score": 85, "candidate_name": null, "rank": null,
                      "skills_match": {"score": 80, "matched_skills": ["Rust"], "missing_skills": null},
                      "overall_assessment": null, "recommendation": "GOOD_MATCH"}"#;
        let result = parse_evaluation(raw, "frank").unwrap();
        assert_eq!(result.candidate_name, "frank");
        assert_eq!(result.overall_score, 85);
        assert!(result.skills_match.unwrap().missing_skills.is_empty());
        assert_eq!(result.overall_assessment, "");
    }

    #[test]
    fn test_prose_response_is_parse_error() {
        let raw = "I'm sorry, I can't evaluate this resume.";
        assert!(parse_evaluation(raw, "bob").is_err());
    }

    #[test]
    fn test_missing_recommendation_is_parse_error() {
        assert!(parse_evaluation(r#"{"overall_score": 50}"#, "bob").is_err());
    }

    #[test]
    fn test_json_array_is_parse_error() {
        assert!(parse_evaluation("[1, 2, 3]", "bob").is_err());
    }
}
