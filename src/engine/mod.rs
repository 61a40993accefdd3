//! Scenario evaluation and validated projection engine.
//!
//! Two halves: `results` turns the untrusted quiz-results bundle into a
//! renderable view model with diagnostics, and `simulator` owns the
//! what-if scenario collection, its bounded random perturbation, and the
//! reward/export derivations.

pub mod results;
pub mod simulator;
