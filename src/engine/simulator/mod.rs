//! What-if scenario simulation: the scenario collection, bounded random
//! perturbation, reward derivation, and the plain-text summary export.

pub mod catalog;
pub mod domain;
pub mod export;
pub mod perturb;
pub mod rewards;
pub mod session;
pub mod store;

pub use catalog::CatalogSet;
pub use domain::{CollegeType, Scenario, ScenarioMetrics};
pub use export::export_summary;
pub use perturb::{auto_experiment, perturb_metrics, perturb_selections};
pub use rewards::{badges_for, total_points, BadgeTier};
pub use session::{InMemorySessions, SessionError, SessionStore};
pub use store::{ScenarioEdit, ScenarioStore, StoreError};
