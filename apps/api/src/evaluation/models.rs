use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ────────────────────────────────────────────────────────────────────────────
// Recommendation
// ────────────────────────────────────────────────────────────────────────────

/// Categorical fit verdict. Serialized as the SCREAMING_SNAKE_CASE literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongMatch,
    GoodMatch,
    ModerateMatch,
    WeakMatch,
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRecommendation(pub String);

impl fmt::Display for UnknownRecommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown recommendation '{}'", self.0)
    }
}

impl FromStr for Recommendation {
    type Err = UnknownRecommendation;

    /// Case-insensitive; spaces and hyphens count as underscores.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                other => other.to_ascii_uppercase(),
            })
            .collect();
        match normalized.as_str() {
            "STRONG_MATCH" => Ok(Self::StrongMatch),
            "GOOD_MATCH" => Ok(Self::GoodMatch),
            "MODERATE_MATCH" => Ok(Self::ModerateMatch),
            "WEAK_MATCH" => Ok(Self::WeakMatch),
            "NO_MATCH" => Ok(Self::NoMatch),
            _ => Err(UnknownRecommendation(raw.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Recommendation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scores
// ────────────────────────────────────────────────────────────────────────────

pub const MAX_SCORE: u32 = 100;

/// Accepts integers, floats, numeric strings and null; rounds and clamps to 0–100.
fn deserialize_score<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let raw = match &value {
        Value::Null => return Ok(0),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| serde::de::Error::custom(format!("score must be a number, got {value}")))?;

    Ok(clamp_score(raw))
}

fn clamp_score(raw: f64) -> u32 {
    raw.round().clamp(0.0, MAX_SCORE as f64) as u32
}

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// ────────────────────────────────────────────────────────────────────────────
// Evaluation records
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillsMatch {
    #[serde(default, deserialize_with = "deserialize_score")]
    pub score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub matched_skills: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_skills: Vec<String>,
}

/// Score plus a short narrative; used for both experience and education.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredSummary {
    #[serde(default, deserialize_with = "deserialize_score")]
    pub score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Certifications {
    #[serde(default, deserialize_with = "deserialize_score")]
    pub score: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub found: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommended: Vec<String>,
}

/// One candidate's evaluation. Sub-records are optional because the oracle may
/// omit them; degraded records always carry the full zero-score shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// 1-based position after ranking; 0 until the ranker runs.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rank: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub candidate_name: String,
    #[serde(default, deserialize_with = "deserialize_score")]
    pub overall_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills_match: Option<SkillsMatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_match: Option<ScoredSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_match: Option<ScoredSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<Certifications>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strengths: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weaknesses: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub overall_assessment: String,
    pub recommendation: Recommendation,
    /// Present only on degraded records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationResult {
    /// Zero-score record substituted when a candidate cannot be evaluated.
    pub fn degraded(
        candidate_name: impl Into<String>,
        overall_assessment: impl Into<String>,
        weakness: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        let not_evaluated = ScoredSummary {
            score: 0,
            summary: "Could not evaluate".to_string(),
        };
        Self {
            rank: 0,
            candidate_name: candidate_name.into(),
            overall_score: 0,
            skills_match: Some(SkillsMatch::default()),
            experience_match: Some(not_evaluated.clone()),
            education_match: Some(not_evaluated),
            certifications: Some(Certifications::default()),
            strengths: Some(Vec::new()),
            weaknesses: Some(vec![weakness.into()]),
            overall_assessment: overall_assessment.into(),
            recommendation: Recommendation::NoMatch,
            error: Some(error.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

/// Final response envelope for one ranking request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    pub total_candidates: usize,
    pub job_description_preview: String,
    pub evaluations: Vec<EvaluationResult>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recommendation_serializes_as_literal() {
        let json = serde_json::to_string(&Recommendation::ModerateMatch).unwrap();
        assert_eq!(json, r#""MODERATE_MATCH""#);
    }

    #[test]
    fn test_recommendation_parse_is_lenient() {
        assert_eq!("strong match".parse(), Ok(Recommendation::StrongMatch));
        assert_eq!("Weak-Match".parse(), Ok(Recommendation::WeakMatch));
        assert_eq!(" NO_MATCH ".parse(), Ok(Recommendation::NoMatch));
        assert!("MAYBE".parse::<Recommendation>().is_err());
    }

    #[test]
    fn test_unknown_recommendation_fails_deserialization() {
        let result: Result<Recommendation, _> = serde_json::from_str(r#""PERFECT_MATCH""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_scores_are_rounded_and_clamped() {
        let skills: SkillsMatch = serde_json::from_value(json!({"score": 87.6})).unwrap();
        assert_eq!(skills.score, 88);
        let skills: SkillsMatch = serde_json::from_value(json!({"score": 140})).unwrap();
        assert_eq!(skills.score, 100);
        let skills: SkillsMatch = serde_json::from_value(json!({"score": -5})).unwrap();
        assert_eq!(skills.score, 0);
        let skills: SkillsMatch = serde_json::from_value(json!({"score": "72%"})).unwrap();
        assert_eq!(skills.score, 72);
        let skills: SkillsMatch = serde_json::from_value(json!({"score": null})).unwrap();
        assert_eq!(skills.score, 0);
    }

    #[test]
    fn test_non_numeric_score_is_rejected() {
        let result: Result<ScoredSummary, _> =
            serde_json::from_value(json!({"score": "excellent", "summary": "x"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_sub_records_stay_absent() {
        let result: EvaluationResult = serde_json::from_value(json!({
            "overall_score": 64,
            "overall_assessment": "Solid backend profile.",
            "recommendation": "GOOD_MATCH"
        }))
        .unwrap();
        assert!(result.skills_match.is_none());
        assert!(result.strengths.is_none());

        let out = serde_json::to_value(&result).unwrap();
        assert!(out.get("skills_match").is_none());
        assert!(out.get("error").is_none());
        assert_eq!(out["recommendation"], "GOOD_MATCH");
    }

    #[test]
    fn test_null_arrays_default_to_empty() {
        let result: EvaluationResult = serde_json::from_value(json!({
            "overall_score": 85,
            "skills_match": {"score": 80, "matched_skills": ["Rust"], "missing_skills": null},
            "experience_match": {"score": 70, "summary": null},
            "certifications": {"score": 10, "found": null, "recommended": null},
            "recommendation": "GOOD_MATCH"
        }))
        .unwrap();
        assert_eq!(result.overall_score, 85);
        let skills = result.skills_match.unwrap();
        assert_eq!(skills.matched_skills, vec!["Rust"]);
        assert!(skills.missing_skills.is_empty());
        assert_eq!(result.experience_match.unwrap().summary, "");
        let certifications = result.certifications.unwrap();
        assert!(certifications.found.is_empty());
        assert!(certifications.recommended.is_empty());
    }

    #[test]
    fn test_null_assessment_defaults_to_empty() {
        let result: EvaluationResult = serde_json::from_value(json!({
            "overall_score": 85,
            "overall_assessment": null,
            "strengths": null,
            "recommendation": "GOOD_MATCH"
        }))
        .unwrap();
        assert_eq!(result.overall_score, 85);
        assert_eq!(result.overall_assessment, "");
        assert!(result.strengths.is_none());
        assert_eq!(result.recommendation, Recommendation::GoodMatch);
    }

    #[test]
    fn test_degraded_record_shape() {
        let record = EvaluationResult::degraded("jane", "boom", "Evaluation failed", "boom");
        assert!(record.is_degraded());
        assert_eq!(record.overall_score, 0);
        assert_eq!(record.recommendation, Recommendation::NoMatch);
        assert_eq!(record.skills_match, Some(SkillsMatch::default()));
        assert_eq!(
            record.experience_match.as_ref().unwrap().summary,
            "Could not evaluate"
        );
        assert_eq!(record.strengths, Some(vec![]));
        assert_eq!(record.weaknesses, Some(vec!["Evaluation failed".to_string()]));
    }
}
