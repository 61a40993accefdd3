//! HTTP surface of the engine.
//!
//! The session routes are generic over the [`SessionStore`] backend so tests
//! can drive them against fixtures; `main` wires in the in-memory backend
//! plus the health/readiness/metrics endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::engine::results::{build_results_view, ResultsBundle, ResultsView};
use crate::engine::simulator::catalog::{seed_scenarios, CatalogSet};
use crate::engine::simulator::perturb::auto_experiment;
use crate::engine::simulator::rewards::{badges_for, total_points, BadgeTier};
use crate::engine::simulator::session::SessionStore;
use crate::engine::simulator::store::{ScenarioEdit, ScenarioStore};
use crate::engine::simulator::Scenario;
use crate::error::AppError;

/// Shared state for the engine routes.
pub struct EngineState<S> {
    pub sessions: Arc<S>,
    pub catalogs: Arc<CatalogSet>,
    /// Perturbation magnitude used when a request does not supply one.
    pub default_magnitude: f64,
}

impl<S> Clone for EngineState<S> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
            catalogs: Arc::clone(&self.catalogs),
            default_magnitude: self.default_magnitude,
        }
    }
}

/// Router exposing the results pipeline and the per-session simulator.
pub fn engine_router<S: SessionStore + 'static>(state: EngineState<S>) -> Router {
    Router::new()
        .route("/api/v1/results/view", post(results_view_handler))
        .route("/api/v1/sessions", post(create_session_handler::<S>))
        .route("/api/v1/sessions/:session_id", get(snapshot_handler::<S>))
        .route(
            "/api/v1/sessions/:session_id/edits",
            post(edit_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/duplicate",
            post(duplicate_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/experiment",
            post(experiment_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/reset",
            post(reset_handler::<S>),
        )
        .route(
            "/api/v1/sessions/:session_id/summary",
            get(summary_handler::<S>),
        )
        .with_state(state)
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsViewResponse {
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub view: ResultsView,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    /// Seed scenarios for the new session; the platform default when absent.
    #[serde(default)]
    pub scenarios: Option<Vec<Scenario>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentRequest {
    #[serde(default)]
    pub magnitude_pct: Option<f64>,
    /// Seeding the roll makes it reproducible; omitted means entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct BadgeView {
    pub tier: BadgeTier,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: String,
    pub generated_at: DateTime<Utc>,
    pub active_id: String,
    pub scenarios: Vec<Scenario>,
    pub total_points: i64,
    pub badges: Vec<BadgeView>,
}

impl SessionSnapshot {
    fn from_store(session_id: String, store: &ScenarioStore) -> Self {
        let points = total_points(store.scenarios());
        Self {
            session_id,
            generated_at: Utc::now(),
            active_id: store.active().id.clone(),
            scenarios: store.scenarios().to_vec(),
            total_points: points,
            badges: badges_for(points)
                .into_iter()
                .map(|tier| BadgeView {
                    tier,
                    label: tier.label(),
                })
                .collect(),
        }
    }
}

/// Run a raw results bundle through the validation pipeline. Malformed
/// bundle CONTENT is not an HTTP error: it comes back as issues alongside
/// the best-effort view.
pub async fn results_view_handler(Json(bundle): Json<ResultsBundle>) -> Json<ResultsViewResponse> {
    let view = build_results_view(&bundle);
    Json(ResultsViewResponse {
        generated_at: Utc::now(),
        view,
    })
}

pub async fn create_session_handler<S: SessionStore>(
    State(state): State<EngineState<S>>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<Response, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let seed = request.scenarios.unwrap_or_else(seed_scenarios);

    let session_id = state.sessions.create(seed)?;
    let store = state.sessions.snapshot(&session_id)?;
    let snapshot = SessionSnapshot::from_store(session_id, &store);
    Ok((StatusCode::CREATED, Json(snapshot)).into_response())
}

pub async fn snapshot_handler<S: SessionStore>(
    State(state): State<EngineState<S>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let store = state.sessions.snapshot(&session_id)?;
    Ok(Json(SessionSnapshot::from_store(session_id, &store)))
}

pub async fn edit_handler<S: SessionStore>(
    State(state): State<EngineState<S>>,
    Path(session_id): Path<String>,
    Json(edit): Json<ScenarioEdit>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let store = state.sessions.update(&session_id, &mut |store| {
        store.apply_edit(edit.clone());
    })?;
    Ok(Json(SessionSnapshot::from_store(session_id, &store)))
}

pub async fn duplicate_handler<S: SessionStore>(
    State(state): State<EngineState<S>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let store = state.sessions.update(&session_id, &mut |store| {
        store.duplicate_active();
    })?;
    Ok(Json(SessionSnapshot::from_store(session_id, &store)))
}

pub async fn experiment_handler<S: SessionStore>(
    State(state): State<EngineState<S>>,
    Path(session_id): Path<String>,
    body: Option<Json<ExperimentRequest>>,
) -> Result<Response, AppError> {
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let magnitude = request.magnitude_pct.unwrap_or(state.default_magnitude);

    if !(0.0..=1.0).contains(&magnitude) {
        let payload = json!({ "error": "magnitudePct must lie in [0, 1]" });
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response());
    }

    let mut rng = match request.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let catalogs = Arc::clone(&state.catalogs);
    let store = state.sessions.update(&session_id, &mut |store| {
        auto_experiment(store, &catalogs, magnitude, &mut rng);
    })?;
    Ok(Json(SessionSnapshot::from_store(session_id, &store)).into_response())
}

pub async fn reset_handler<S: SessionStore>(
    State(state): State<EngineState<S>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let store = state.sessions.update(&session_id, &mut |store| {
        store.reset_active_selections();
    })?;
    Ok(Json(SessionSnapshot::from_store(session_id, &store)))
}

pub async fn summary_handler<S: SessionStore>(
    State(state): State<EngineState<S>>,
    Path(session_id): Path<String>,
) -> Result<Response, AppError> {
    let store = state.sessions.snapshot(&session_id)?;
    let summary = crate::engine::simulator::export::export_summary(store.scenarios());
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        summary,
    )
        .into_response())
}
