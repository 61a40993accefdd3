//! Tolerant validators for the untrusted results bundle.
//!
//! Malformed input never raises: shape mismatches yield an empty valid set
//! plus a diagnostic, per-record failures drop the record and continue. The
//! surviving records keep their input order.

use super::domain::{
    CareerSuggestion, CollegeMatch, IssueSource, StreamScores, ValidationIssue,
};
use serde_json::Value;

/// Best-effort valid subset plus the diagnostics accumulated on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T> {
    pub valid: T,
    pub issues: Vec<ValidationIssue>,
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Coerce a JSON value to a score. Numbers pass through; numeric strings are
/// parsed (the upstream quiz service has been seen sending both). Anything
/// else is rejected.
fn coerce_score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn non_empty_str<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}

/// Validate the raw stream-score map. Retained scores are finite and within
/// [0, 1]; everything else becomes an issue naming the offending key.
pub fn validate_stream_scores(raw: &Value) -> Validated<StreamScores> {
    let Some(object) = raw.as_object() else {
        return Validated {
            valid: StreamScores::new(),
            issues: vec![ValidationIssue::new(
                IssueSource::Streams,
                format!("expected an object of stream scores, got {}", json_kind(raw)),
            )],
        };
    };

    let mut valid = StreamScores::new();
    let mut issues = Vec::new();

    for (key, value) in object {
        if key.is_empty() {
            issues.push(ValidationIssue::new(
                IssueSource::Streams,
                "dropped entry with an empty stream name",
            ));
            continue;
        }

        match coerce_score(value) {
            Some(score) if score.is_finite() && (0.0..=1.0).contains(&score) => {
                valid.insert(key.clone(), score);
            }
            _ => issues.push(ValidationIssue::new(
                IssueSource::Streams,
                format!("score for '{key}' is not a number in [0, 1]"),
            )),
        }
    }

    Validated { valid, issues }
}

/// Validate the raw career-suggestion list. A suggestion survives only with
/// non-empty `title`, `stream`, and `description`; one issue per dropped
/// record lists every missing field.
pub fn validate_careers(raw: &Value) -> Validated<Vec<CareerSuggestion>> {
    let Some(items) = raw.as_array() else {
        return Validated {
            valid: Vec::new(),
            issues: vec![ValidationIssue::new(
                IssueSource::Careers,
                format!("expected an array of careers, got {}", json_kind(raw)),
            )],
        };
    };

    let mut valid = Vec::new();
    let mut issues = Vec::new();

    for (index, record) in items.iter().enumerate() {
        if !record.is_object() {
            issues.push(ValidationIssue::new(
                IssueSource::Careers,
                format!("career at index {index} is {}, not an object", json_kind(record)),
            ));
            continue;
        }

        let title = non_empty_str(record, "title");
        let stream = non_empty_str(record, "stream");
        let description = non_empty_str(record, "description");

        let mut missing = Vec::new();
        if title.is_none() {
            missing.push("title");
        }
        if stream.is_none() {
            missing.push("stream");
        }
        if description.is_none() {
            missing.push("description");
        }

        if !missing.is_empty() {
            let subject = match title {
                Some(title) => format!("career '{title}'"),
                None => format!("career at index {index}"),
            };
            issues.push(ValidationIssue::new(
                IssueSource::Careers,
                format!("{subject} missing {}", missing.join(", ")),
            ));
            continue;
        }

        valid.push(CareerSuggestion {
            title: title.unwrap_or_default().to_string(),
            stream: stream.unwrap_or_default().to_string(),
            description: description.unwrap_or_default().to_string(),
            icon: record
                .get("icon")
                .and_then(Value::as_str)
                .map(str::to_string),
        });
    }

    Validated { valid, issues }
}

/// Validate the raw college-match list. `id` and `name` must be non-empty
/// strings and `programs` an array of strings (empty is fine). `location`
/// and `rating` are cosmetic and default when absent.
pub fn validate_colleges(raw: &Value) -> Validated<Vec<CollegeMatch>> {
    let Some(items) = raw.as_array() else {
        return Validated {
            valid: Vec::new(),
            issues: vec![ValidationIssue::new(
                IssueSource::Colleges,
                format!("expected an array of colleges, got {}", json_kind(raw)),
            )],
        };
    };

    let mut valid = Vec::new();
    let mut issues = Vec::new();

    for (index, record) in items.iter().enumerate() {
        if !record.is_object() {
            issues.push(ValidationIssue::new(
                IssueSource::Colleges,
                format!(
                    "college at index {index} is {}, not an object",
                    json_kind(record)
                ),
            ));
            continue;
        }

        let id = non_empty_str(record, "id");
        let name = non_empty_str(record, "name");
        let programs = record.get("programs").and_then(Value::as_array).map(|list| {
            list.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        let mut missing = Vec::new();
        if id.is_none() {
            missing.push("id");
        }
        if name.is_none() {
            missing.push("name");
        }
        if programs.is_none() {
            missing.push("programs");
        }

        if !missing.is_empty() {
            let subject = match name {
                Some(name) => format!("college '{name}'"),
                None => format!("college at index {index}"),
            };
            issues.push(ValidationIssue::new(
                IssueSource::Colleges,
                format!("{subject} missing {}", missing.join(", ")),
            ));
            continue;
        }

        valid.push(CollegeMatch {
            id: id.unwrap_or_default().to_string(),
            name: name.unwrap_or_default().to_string(),
            programs: programs.unwrap_or_default(),
            location: record
                .get("location")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            rating: record.get("rating").and_then(Value::as_f64).unwrap_or(0.0),
        });
    }

    Validated { valid, issues }
}

impl Validated<StreamScores> {
    /// Re-validating an already-valid map must be a no-op; used by tests to
    /// lock in idempotence.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn non_object_score_map_yields_single_shape_issue() {
        let checked = validate_stream_scores(&json!([1, 2, 3]));
        assert!(checked.valid.is_empty());
        assert_eq!(checked.issues.len(), 1);
        assert!(checked.issues[0].message.contains("an array"));
    }

    #[test]
    fn scores_outside_unit_interval_are_dropped_by_key() {
        let checked = validate_stream_scores(&json!({
            "Science": 0.78,
            "Commerce": 1.2,
            "Arts": "bad",
            "Vocational": "0.5",
        }));

        assert_eq!(checked.valid.get("Science"), Some(0.78));
        assert_eq!(checked.valid.get("Vocational"), Some(0.5));
        assert!(!checked.valid.contains("Commerce"));
        assert!(!checked.valid.contains("Arts"));
        assert_eq!(checked.issues.len(), 2);
        assert!(checked
            .issues
            .iter()
            .any(|issue| issue.message.contains("'Arts'")));
        assert!(checked
            .issues
            .iter()
            .any(|issue| issue.message.contains("'Commerce'")));
    }

    #[test]
    fn revalidating_a_valid_map_is_idempotent() {
        let first = validate_stream_scores(&json!({ "Science": 0.9, "Arts": 0.3 }));
        let again = validate_stream_scores(&serde_json::to_value(&first.valid).expect("serializes"));
        assert_eq!(again.valid, first.valid);
        assert!(again.is_clean());
    }

    #[test]
    fn careers_keep_input_order_minus_dropped_records() {
        let checked = validate_careers(&json!([
            { "title": "Engineer", "stream": "Science", "description": "Build things" },
            { "title": "Ghost", "stream": "" },
            42,
            { "title": "Analyst", "stream": "Commerce", "description": "Read markets", "icon": "chart" },
        ]));

        let titles: Vec<&str> = checked
            .valid
            .iter()
            .map(|career| career.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Engineer", "Analyst"]);
        assert_eq!(checked.valid[1].icon.as_deref(), Some("chart"));
        assert_eq!(checked.issues.len(), 2);
        assert!(checked.issues[0].message.contains("'Ghost'"));
        assert!(checked.issues[0].message.contains("stream"));
        assert!(checked.issues[0].message.contains("description"));
        assert!(checked.issues[1].message.contains("index 2"));
    }

    #[test]
    fn college_with_empty_programs_is_valid() {
        let checked = validate_colleges(&json!([
            { "id": "c1", "name": "IIT Delhi", "programs": [], "location": "Delhi", "rating": 4.8 },
            { "id": "c2", "name": "Nameless", "programs": "B.Tech" },
        ]));

        assert_eq!(checked.valid.len(), 1);
        assert_eq!(checked.valid[0].id, "c1");
        assert!(checked.valid[0].programs.is_empty());
        assert_eq!(checked.issues.len(), 1);
        assert!(checked.issues[0].message.contains("programs"));
    }

    #[test]
    fn non_array_colleges_input_reports_shape() {
        let checked = validate_colleges(&json!(null));
        assert!(checked.valid.is_empty());
        assert_eq!(checked.issues.len(), 1);
        assert_eq!(checked.issues[0].source, IssueSource::Colleges);
    }
}
