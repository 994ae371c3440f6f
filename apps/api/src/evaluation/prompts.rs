// Prompt text for candidate evaluation.
// User-supplied text is spliced in with format! rather than placeholder replacement,
// so a resume containing `{job_description}` cannot rewrite the prompt.

const EVALUATION_PREAMBLE: &str = "You are an expert hiring manager and resume evaluator. \
Analyze the following resume against the job description provided.";

/// Schema the oracle must answer with. Mirrors `EvaluationResult` minus `rank`,
/// `candidate_name` and `error`, which the service fills in itself.
const EVALUATION_SCHEMA_INSTRUCTION: &str = r#"Evaluate this candidate and provide a JSON response with EXACTLY this structure (no markdown, no code blocks, just pure JSON):
{
    "overall_score": <number from 0 to 100>,
    "skills_match": {
        "score": <number from 0 to 100>,
        "matched_skills": ["list of skills that match the job requirements"],
        "missing_skills": ["list of required skills not found in the resume"]
    },
    "experience_match": {
        "score": <number from 0 to 100>,
        "summary": "Brief assessment of relevant work experience"
    },
    "education_match": {
        "score": <number from 0 to 100>,
        "summary": "Brief assessment of educational qualifications"
    },
    "certifications": {
        "score": <number from 0 to 100>,
        "found": ["list of relevant certifications found"],
        "recommended": ["list of missing but recommended certifications"]
    },
    "strengths": ["list of 3-5 key strengths of this candidate"],
    "weaknesses": ["list of 2-4 areas where the candidate falls short"],
    "overall_assessment": "A 2-3 sentence summary explaining why this candidate is or isn't a good fit for the role",
    "recommendation": "STRONG_MATCH" or "GOOD_MATCH" or "MODERATE_MATCH" or "WEAK_MATCH" or "NO_MATCH"
}

Return ONLY the JSON object. Be thorough, fair, and objective in your evaluation. Consider not just keyword matches but the depth and relevance of experience."#;

/// Builds the single prompt sent to the oracle for one candidate.
pub fn build_evaluation_prompt(
    job_description: &str,
    candidate_name: &str,
    resume_text: &str,
) -> String {
    format!(
        "{EVALUATION_PREAMBLE}\n\n\
         JOB DESCRIPTION:\n{job_description}\n\n\
         CANDIDATE RESUME ({candidate_name}):\n{resume_text}\n\n\
         {EVALUATION_SCHEMA_INSTRUCTION}"
    )
}
