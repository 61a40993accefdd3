//! Validation, ranking, and view-model assembly for guidance results.

pub mod domain;
pub mod ranking;
pub mod validate;
pub mod view;

pub use domain::{
    CareerSuggestion, CollegeMatch, IssueSource, RankedStream, StreamScores, ValidationIssue,
};
pub use ranking::{filter_careers_by_valid_streams, rank_streams, top_stream};
pub use validate::{validate_careers, validate_colleges, validate_stream_scores, Validated};
pub use view::{build_results_view, ResultsBundle, ResultsView};
