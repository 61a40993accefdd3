use super::domain::{CollegeType, Scenario};
use serde::{Deserialize, Serialize};

/// A single-field edit applied to the active scenario. One variant per
/// editable field: an unrecognized field name cannot be expressed here, and
/// on the wire it fails deserialization before it reaches the store.
///
/// Edits deliberately do not cascade: changing `stream` leaves a now
/// inconsistent `course` in place until the caller changes or resets it,
/// matching how the advisory client behaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ScenarioEdit {
    Name(String),
    Stream(String),
    Course(String),
    CollegeType(Option<CollegeType>),
    College(String),
    Skills(Vec<String>),
    Upskill(Vec<String>),
    Scholarship(Option<String>),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("scenario seed must contain at least one scenario")]
    EmptySeed,
}

/// Ordered scenario collection with one designated active scenario.
///
/// The collection is never empty: construction refuses an empty seed and no
/// delete operation exists, so `active()` is infallible by construction and
/// the active index always points at a real entry.
#[derive(Debug, Clone)]
pub struct ScenarioStore {
    scenarios: Vec<Scenario>,
    active: usize,
}

impl ScenarioStore {
    pub fn initialize(seed: Vec<Scenario>) -> Result<Self, StoreError> {
        if seed.is_empty() {
            return Err(StoreError::EmptySeed);
        }
        Ok(Self {
            scenarios: seed,
            active: 0,
        })
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn active(&self) -> &Scenario {
        &self.scenarios[self.active]
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub(crate) fn active_mut(&mut self) -> &mut Scenario {
        &mut self.scenarios[self.active]
    }

    /// Replace the active scenario wholesale. Used by the projection
    /// calculator to commit a perturbed copy.
    pub(crate) fn commit_active(&mut self, scenario: Scenario) {
        self.scenarios[self.active] = scenario;
    }

    /// Append a deep copy of the active scenario and make it active. The
    /// original is untouched.
    pub fn duplicate_active(&mut self) -> &Scenario {
        let copy = self.active().duplicated();
        self.scenarios.push(copy);
        self.active = self.scenarios.len() - 1;
        self.active()
    }

    /// Apply one field edit to the active scenario only.
    pub fn apply_edit(&mut self, edit: ScenarioEdit) {
        let scenario = self.active_mut();
        match edit {
            ScenarioEdit::Name(name) => scenario.name = name,
            ScenarioEdit::Stream(stream) => scenario.stream = stream,
            ScenarioEdit::Course(course) => scenario.course = course,
            ScenarioEdit::CollegeType(college_type) => scenario.college_type = college_type,
            ScenarioEdit::College(college) => scenario.college = college,
            ScenarioEdit::Skills(skills) => scenario.skills = skills,
            ScenarioEdit::Upskill(upskill) => scenario.upskill = upskill,
            ScenarioEdit::Scholarship(scholarship) => scenario.scholarship = scholarship,
        }
    }

    /// Blank the active scenario's selection fields; metrics and the other
    /// scenarios are untouched.
    pub fn reset_active_selections(&mut self) {
        self.active_mut().clear_selections();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::simulator::catalog::seed_scenarios;

    #[test]
    fn refuses_empty_seed() {
        let err = ScenarioStore::initialize(Vec::new()).expect_err("empty seed rejected");
        assert!(matches!(err, StoreError::EmptySeed));
    }

    #[test]
    fn starts_with_first_scenario_active() {
        let store = ScenarioStore::initialize(seed_scenarios()).expect("seed is non-empty");
        assert_eq!(store.active_index(), 0);
        assert_eq!(store.active().id, store.scenarios()[0].id);
    }

    #[test]
    fn duplicate_appends_and_activates_the_copy() {
        let mut store = ScenarioStore::initialize(seed_scenarios()).expect("seed is non-empty");
        let original_id = store.active().id.clone();
        let original_stream = store.active().stream.clone();

        let copy_id = store.duplicate_active().id.clone();

        assert_eq!(store.scenarios().len(), 2);
        assert_eq!(store.active_index(), 1);
        assert_ne!(copy_id, original_id);
        assert_eq!(store.scenarios()[0].id, original_id);
        assert_eq!(store.scenarios()[0].stream, original_stream);
    }

    #[test]
    fn edits_touch_only_the_active_scenario() {
        let mut store = ScenarioStore::initialize(seed_scenarios()).expect("seed is non-empty");
        store.duplicate_active();

        store.apply_edit(ScenarioEdit::Stream("Arts".to_string()));

        assert_eq!(store.active().stream, "Arts");
        assert_eq!(store.scenarios()[0].stream, "Science");
    }

    #[test]
    fn stream_edit_leaves_stale_course_in_place() {
        let mut store = ScenarioStore::initialize(seed_scenarios()).expect("seed is non-empty");
        store.apply_edit(ScenarioEdit::Stream("Arts".to_string()));

        // Lenient by design: the dependent course is not cascade-reset.
        assert_eq!(store.active().course, "B.Tech");
    }

    #[test]
    fn reset_blanks_selections_and_keeps_metrics() {
        let mut store = ScenarioStore::initialize(seed_scenarios()).expect("seed is non-empty");
        let npv_before = store.active().metrics.npv;

        store.reset_active_selections();

        let active = store.active();
        assert!(active.stream.is_empty());
        assert!(active.course.is_empty());
        assert!(active.college_type.is_none());
        assert!(active.college.is_empty());
        assert!(active.skills.is_empty());
        assert!(active.upskill.is_empty());
        assert!(active.scholarship.is_none());
        assert_eq!(active.metrics.npv, npv_before);
    }

    #[test]
    fn edit_payload_with_unknown_field_fails_to_parse() {
        let err = serde_json::from_str::<ScenarioEdit>(
            r#"{ "field": "favouriteColour", "value": "blue" }"#,
        )
        .expect_err("unknown field rejected at the boundary");
        assert!(err.to_string().contains("favouriteColour"));
    }
}
