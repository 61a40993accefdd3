//! Deterministic ranking derived from validated stream scores.

use super::domain::{CareerSuggestion, RankedStream, StreamScores};

/// Rank streams by score descending. The sort is stable: streams with equal
/// scores keep their input order.
pub fn rank_streams(scores: &StreamScores) -> Vec<RankedStream> {
    let mut ranked: Vec<RankedStream> = scores
        .iter()
        .map(|(stream, score)| RankedStream {
            stream: stream.to_string(),
            score,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// The best-matching stream, if any stream validated at all. Callers branch
/// on `None` instead of indexing into the ranking.
pub fn top_stream(ranked: &[RankedStream]) -> Option<&RankedStream> {
    ranked.first()
}

/// Keep only careers whose stream validated. When NO stream validated the
/// filter is disabled and every career passes through; the platform prefers
/// showing unscoped suggestions over an empty page. Deliberate policy,
/// locked in by test.
pub fn filter_careers_by_valid_streams(
    careers: Vec<CareerSuggestion>,
    scores: &StreamScores,
) -> Vec<CareerSuggestion> {
    if scores.is_empty() {
        return careers;
    }

    careers
        .into_iter()
        .filter(|career| scores.contains(&career.stream))
        .collect()
}
