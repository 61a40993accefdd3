//! Assembly of the renderable results view-model from a raw bundle.

use super::domain::{CareerSuggestion, CollegeMatch, RankedStream, ValidationIssue};
use super::ranking::{filter_careers_by_valid_streams, rank_streams, top_stream};
use super::validate::{validate_careers, validate_colleges, validate_stream_scores};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The loosely-typed bundle handed over by the results service. Nothing in
/// here is trusted until it has been through the validators.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsBundle {
    #[serde(default)]
    pub stream_scores: Value,
    #[serde(default)]
    pub careers: Value,
    #[serde(default)]
    pub colleges: Value,
}

/// Display-ready projection of a results bundle plus the diagnostics that
/// explain everything that was dropped on the way.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsView {
    pub ranked_streams: Vec<RankedStream>,
    pub top_stream: Option<RankedStream>,
    pub validated_careers: Vec<CareerSuggestion>,
    pub validated_colleges: Vec<CollegeMatch>,
    pub issues: Vec<ValidationIssue>,
}

impl ResultsView {
    /// True when literally nothing validated. A normal terminal state, not a
    /// fault: the caller switches to its fallback surface.
    pub fn is_empty(&self) -> bool {
        self.ranked_streams.is_empty()
            && self.validated_careers.is_empty()
            && self.validated_colleges.is_empty()
    }
}

/// Run the full validate → filter → rank pipeline over a raw bundle.
pub fn build_results_view(bundle: &ResultsBundle) -> ResultsView {
    let scores = validate_stream_scores(&bundle.stream_scores);
    let careers = validate_careers(&bundle.careers);
    let colleges = validate_colleges(&bundle.colleges);

    let mut issues = scores.issues;
    issues.extend(careers.issues);
    issues.extend(colleges.issues);

    let ranked_streams = rank_streams(&scores.valid);
    let top_stream = top_stream(&ranked_streams).cloned();
    let validated_careers = filter_careers_by_valid_streams(careers.valid, &scores.valid);

    ResultsView {
        ranked_streams,
        top_stream,
        validated_careers,
        validated_colleges: colleges.valid,
        issues,
    }
}
