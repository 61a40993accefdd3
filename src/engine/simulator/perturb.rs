//! Bounded random perturbation of the active scenario.
//!
//! This is a sampling tool for what-if exploration, not a predictive model.
//! Every function takes the random source as an argument so callers (and
//! tests) decide the seed.

use super::catalog::CatalogSet;
use super::domain::{CollegeType, Scenario};
use super::store::ScenarioStore;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fixed internal jitter for return on investment.
const ROI_JITTER: f64 = 0.05;
/// Fixed additive jitter for the probability metrics.
const PROB_JITTER: f64 = 0.05;
/// Fixed internal jitter for time-to-job.
const TIME_JITTER: f64 = 0.15;

fn jitter<R: Rng>(rng: &mut R, magnitude: f64) -> f64 {
    if magnitude <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-magnitude..=magnitude)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Re-roll every selection field uniformly from the catalogs. An empty
/// dependent catalog yields a blank field, never an error.
pub fn perturb_selections<R: Rng>(
    scenario: &Scenario,
    catalogs: &CatalogSet,
    rng: &mut R,
) -> Scenario {
    let mut rolled = scenario.clone();

    rolled.stream = catalogs
        .streams
        .choose(rng)
        .map(|entry| entry.id.to_string())
        .unwrap_or_default();
    rolled.course = catalogs
        .courses_for(&rolled.stream)
        .choose(rng)
        .map(|course| course.to_string())
        .unwrap_or_default();

    let college_type = *CollegeType::ordered()
        .choose(rng)
        .unwrap_or(&CollegeType::Government);
    rolled.college_type = Some(college_type);
    rolled.college = catalogs
        .colleges_for(college_type)
        .choose(rng)
        .map(|college| college.to_string())
        .unwrap_or_default();

    let skill_count = rng.gen_range(1..=2usize).min(catalogs.skills.len());
    rolled.skills = catalogs
        .skills
        .choose_multiple(rng, skill_count)
        .map(|skill| skill.to_string())
        .collect();

    let upskill_count = rng.gen_range(0..=1usize).min(catalogs.upskills.len());
    rolled.upskill = catalogs
        .upskills
        .choose_multiple(rng, upskill_count)
        .map(|upskill| upskill.to_string())
        .collect();

    rolled.scholarship = if rng.gen_bool(0.5) {
        None
    } else {
        catalogs
            .scholarships
            .choose(rng)
            .map(|scholarship| scholarship.to_string())
    };

    rolled
}

/// Perturb the outcome metrics by bounded uniform noise. Absent metrics take
/// their documented defaults first, so the output always carries a full set.
pub fn perturb_metrics<R: Rng>(scenario: &Scenario, magnitude: f64, rng: &mut R) -> Scenario {
    let mut perturbed = scenario.clone();
    let mut metrics = scenario.metrics.resolved();

    metrics.npv = (metrics.npv * (1.0 + jitter(rng, magnitude))).round();
    metrics.starting_salary = (metrics.starting_salary * (1.0 + jitter(rng, magnitude))).round();
    metrics.roi = round2(metrics.roi * (1.0 + jitter(rng, ROI_JITTER)));
    metrics.employment_prob = (metrics.employment_prob + jitter(rng, PROB_JITTER)).clamp(0.0, 1.0);
    metrics.scholarship_odds =
        (metrics.scholarship_odds + jitter(rng, PROB_JITTER)).clamp(0.0, 1.0);
    metrics.time_to_job =
        ((metrics.time_to_job as f64 * (1.0 + jitter(rng, TIME_JITTER))).round() as u32).max(1);

    perturbed.metrics = metrics.into();
    perturbed
}

/// Re-roll selections then metrics on the active scenario and commit the
/// result. Deterministic given the store, catalogs, magnitude, and RNG state.
pub fn auto_experiment<R: Rng>(
    store: &mut ScenarioStore,
    catalogs: &CatalogSet,
    magnitude: f64,
    rng: &mut R,
) {
    let rolled = perturb_selections(store.active(), catalogs, rng);
    let committed = perturb_metrics(&rolled, magnitude, rng);
    store.commit_active(committed);
}
