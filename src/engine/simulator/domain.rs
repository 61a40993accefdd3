use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Funding model of a college choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollegeType {
    Government,
    Private,
}

impl CollegeType {
    pub const fn ordered() -> [Self; 2] {
        [Self::Government, Self::Private]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Government => "Government",
            Self::Private => "Private",
        }
    }
}

/// Projected outcome metrics for a scenario. Every field is optional on the
/// wire; the projection calculator substitutes documented defaults before it
/// perturbs anything, and the reward aggregation counts a missing NPV as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioMetrics {
    /// Net present value of the career path, in rupees.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub npv: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roi: Option<f64>,
    /// Probability of employment after graduation, in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_prob: Option<f64>,
    /// Expected starting salary, in rupees per year.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_salary: Option<f64>,
    /// Months from graduation to first job, at least 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_to_job: Option<u32>,
    /// Odds of landing the chosen scholarship, in [0, 1].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scholarship_odds: Option<f64>,
}

/// Metrics with defaults applied, ready for perturbation or display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMetrics {
    pub npv: f64,
    pub roi: f64,
    pub employment_prob: f64,
    pub starting_salary: f64,
    pub time_to_job: u32,
    pub scholarship_odds: f64,
}

impl ScenarioMetrics {
    pub const DEFAULT_NPV: f64 = 800_000.0;
    pub const DEFAULT_ROI: f64 = 1.2;
    pub const DEFAULT_EMPLOYMENT_PROB: f64 = 0.6;
    pub const DEFAULT_STARTING_SALARY: f64 = 300_000.0;
    pub const DEFAULT_TIME_TO_JOB: u32 = 6;
    pub const DEFAULT_SCHOLARSHIP_ODDS: f64 = 0.4;

    pub fn resolved(&self) -> ResolvedMetrics {
        ResolvedMetrics {
            npv: self.npv.unwrap_or(Self::DEFAULT_NPV),
            roi: self.roi.unwrap_or(Self::DEFAULT_ROI),
            employment_prob: self
                .employment_prob
                .unwrap_or(Self::DEFAULT_EMPLOYMENT_PROB),
            starting_salary: self
                .starting_salary
                .unwrap_or(Self::DEFAULT_STARTING_SALARY),
            time_to_job: self.time_to_job.unwrap_or(Self::DEFAULT_TIME_TO_JOB),
            scholarship_odds: self
                .scholarship_odds
                .unwrap_or(Self::DEFAULT_SCHOLARSHIP_ODDS),
        }
    }
}

impl From<ResolvedMetrics> for ScenarioMetrics {
    fn from(value: ResolvedMetrics) -> Self {
        Self {
            npv: Some(value.npv),
            roi: Some(value.roi),
            employment_prob: Some(value.employment_prob),
            starting_salary: Some(value.starting_salary),
            time_to_job: Some(value.time_to_job),
            scholarship_odds: Some(value.scholarship_odds),
        }
    }
}

/// A user-editable bundle of educational/career choices plus derived outcome
/// metrics. Blank selections are empty strings (or `None` for the optional
/// college type and scholarship); the store's reset operation produces
/// exactly that shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stream: String,
    /// Should belong to `stream`'s course set; edits do not re-validate it.
    #[serde(default)]
    pub course: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_type: Option<CollegeType>,
    /// Should belong to `college_type`'s college set; edits do not
    /// re-validate it.
    #[serde(default)]
    pub college: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub upskill: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scholarship: Option<String>,
    #[serde(flatten)]
    pub metrics: ScenarioMetrics,
}

static SCENARIO_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_scenario_id() -> String {
    let id = SCENARIO_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("scn-{id:06}")
}

impl Scenario {
    /// A blank scenario with a fresh id and default metrics left unset.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: next_scenario_id(),
            name: name.into(),
            stream: String::new(),
            course: String::new(),
            college_type: None,
            college: String::new(),
            skills: Vec::new(),
            upskill: Vec::new(),
            scholarship: None,
            metrics: ScenarioMetrics::default(),
        }
    }

    /// Deep copy with a fresh unique id and a derived default name.
    pub fn duplicated(&self) -> Self {
        let mut copy = self.clone();
        copy.id = next_scenario_id();
        copy.name = format!("{} (copy)", self.name);
        copy
    }

    /// Blank every selection field, leaving metrics and identity untouched.
    pub fn clear_selections(&mut self) {
        self.stream.clear();
        self.course.clear();
        self.college_type = None;
        self.college.clear();
        self.skills.clear();
        self.upskill.clear();
        self.scholarship = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_ids_are_unique_and_prefixed() {
        let a = Scenario::named("A");
        let b = Scenario::named("B");
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("scn-"));
    }

    #[test]
    fn duplicate_keeps_fields_but_not_identity() {
        let mut original = Scenario::named("Base plan");
        original.stream = "Science".to_string();
        original.metrics.npv = Some(1_200_000.0);

        let copy = original.duplicated();
        assert_ne!(copy.id, original.id);
        assert_eq!(copy.name, "Base plan (copy)");
        assert_eq!(copy.stream, original.stream);
        assert_eq!(copy.metrics, original.metrics);
    }

    #[test]
    fn resolved_metrics_fill_documented_defaults() {
        let metrics = ScenarioMetrics {
            npv: Some(1_000_000.0),
            ..Default::default()
        };
        let resolved = metrics.resolved();
        assert_eq!(resolved.npv, 1_000_000.0);
        assert_eq!(resolved.roi, ScenarioMetrics::DEFAULT_ROI);
        assert_eq!(resolved.time_to_job, ScenarioMetrics::DEFAULT_TIME_TO_JOB);
    }

    #[test]
    fn clear_selections_preserves_metrics() {
        let mut scenario = Scenario::named("Plan");
        scenario.stream = "Arts".to_string();
        scenario.skills = vec!["writing".to_string()];
        scenario.metrics.roi = Some(1.4);

        scenario.clear_selections();
        assert!(scenario.stream.is_empty());
        assert!(scenario.skills.is_empty());
        assert_eq!(scenario.metrics.roi, Some(1.4));
    }
}
