use serde::{Deserialize, Serialize};
use std::fmt;

/// Which slice of the raw bundle a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSource {
    Streams,
    Careers,
    Colleges,
}

impl IssueSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Streams => "Streams",
            Self::Careers => "Careers",
            Self::Colleges => "Colleges",
        }
    }
}

/// Human-readable diagnostic explaining why a piece of raw input was dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub source: IssueSource,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(source: IssueSource, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source.label(), self.message)
    }
}

/// Validated stream-affinity scores, every value finite and in [0, 1].
///
/// Keys keep their first-seen order because the ranking tie-break is defined
/// against input iteration order, which a key-sorted map would erase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamScores {
    entries: Vec<(String, f64)>,
}

impl Serialize for StreamScores {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (stream, score) in &self.entries {
            map.serialize_entry(stream, score)?;
        }
        map.end()
    }
}

impl StreamScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a score. Range checks belong to the validator;
    /// this container only maintains key uniqueness and order.
    pub fn insert(&mut self, stream: impl Into<String>, score: f64) {
        let stream = stream.into();
        match self.entries.iter_mut().find(|(name, _)| *name == stream) {
            Some((_, existing)) => *existing = score,
            None => self.entries.push((stream, score)),
        }
    }

    pub fn get(&self, stream: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == stream)
            .map(|(_, score)| *score)
    }

    pub fn contains(&self, stream: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == stream)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries
            .iter()
            .map(|(name, score)| (name.as_str(), *score))
    }
}

impl FromIterator<(String, f64)> for StreamScores {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        let mut scores = Self::new();
        for (stream, score) in iter {
            scores.insert(stream, score);
        }
        scores
    }
}

/// A career suggestion surfaced alongside the quiz results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerSuggestion {
    pub title: String,
    /// Should reference a key of the validated [`StreamScores`].
    pub stream: String,
    pub description: String,
    /// Opaque display token, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// A college matched to the student's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollegeMatch {
    pub id: String,
    pub name: String,
    /// Empty is valid; a missing or non-array field is not.
    #[serde(default)]
    pub programs: Vec<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub rating: f64,
}

/// One entry of the descending stream ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedStream {
    pub stream: String,
    pub score: f64,
}
