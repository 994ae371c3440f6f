use crate::evaluation::models::EvaluationResult;

/// Orders evaluations by `overall_score`, highest first, and assigns 1-based ranks.
///
/// `sort_by` is stable: equal scores keep submission order, so the first-submitted
/// candidate wins a tie regardless of which oracle call finished first.
pub fn rank_evaluations(mut evaluations: Vec<EvaluationResult>) -> Vec<EvaluationResult> {
    evaluations.sort_by(|a, b| b.overall_score.cmp(&a.overall_score));
    for (position, evaluation) in evaluations.iter_mut().enumerate() {
        evaluation.rank = position as u32 + 1;
    }
    evaluations
}
