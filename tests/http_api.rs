use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use disha_ai::engine::simulator::catalog::CatalogSet;
use disha_ai::engine::simulator::session::InMemorySessions;
use disha_ai::http::{engine_router, EngineState};

fn router() -> Router {
    engine_router(EngineState {
        sessions: Arc::new(InMemorySessions::new()),
        catalogs: Arc::new(CatalogSet::standard()),
        default_magnitude: 0.12,
    })
}

fn post_json(uri: &str, payload: &Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("payload serializes")))
        .expect("request builds")
}

fn post_empty(uri: &str) -> Request<Body> {
    Request::post(uri)
        .body(Body::empty())
        .expect("request builds")
}

async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("body is JSON")
}

async fn create_session(router: &Router) -> String {
    let response = router
        .clone()
        .oneshot(post_empty("/api/v1/sessions"))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    payload["sessionId"]
        .as_str()
        .expect("session id present")
        .to_string()
}

#[tokio::test]
async fn results_view_accepts_malformed_content_without_http_error() {
    let response = router()
        .oneshot(post_json(
            "/api/v1/results/view",
            &json!({
                "streamScores": { "Science": 0.78, "Arts": "bad" },
                "careers": [{ "title": "X", "stream": "Science", "description": "d" }],
                "colleges": [],
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["topStream"]["stream"], "Science");
    assert_eq!(payload["issues"].as_array().expect("issues array").len(), 1);
    assert!(payload.get("generatedAt").is_some());
}

#[tokio::test]
async fn new_session_starts_with_the_default_seed() {
    let app = router();
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/sessions/{id}"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["scenarios"].as_array().expect("scenarios").len(), 1);
    assert_eq!(payload["scenarios"][0]["name"], "My Plan");
    assert_eq!(payload["totalPoints"], 12);
    assert_eq!(payload["badges"][0]["label"], "Beginner");
}

#[tokio::test]
async fn unknown_session_returns_not_found() {
    let response = router()
        .oneshot(
            Request::get("/api/v1/sessions/ses-999999")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edits_apply_to_the_active_scenario() {
    let app = router();
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{id}/edits"),
            &json!({ "field": "stream", "value": "Arts" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["scenarios"][0]["stream"], "Arts");
    // Lenient dependent-field policy: the stale course stays.
    assert_eq!(payload["scenarios"][0]["course"], "B.Tech");
}

#[tokio::test]
async fn unknown_edit_field_is_rejected_before_the_store() {
    let app = router();
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{id}/edits"),
            &json!({ "field": "favouriteColour", "value": "blue" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn duplicate_then_seeded_experiment_is_reproducible() {
    let app = router();

    let first = run_experiment_flow(&app).await;
    let second = run_experiment_flow(&app).await;

    assert_eq!(first["scenarios"][1]["stream"], second["scenarios"][1]["stream"]);
    assert_eq!(first["scenarios"][1]["npv"], second["scenarios"][1]["npv"]);
    assert_eq!(first["scenarios"][1]["skills"], second["scenarios"][1]["skills"]);
}

async fn run_experiment_flow(app: &Router) -> Value {
    let id = create_session(app).await;

    let response = app
        .clone()
        .oneshot(post_empty(&format!("/api/v1/sessions/{id}/duplicate")))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{id}/experiment"),
            &json!({ "seed": 42 }),
        ))
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);
    read_json_body(response).await
}

#[tokio::test]
async fn out_of_range_magnitude_is_rejected() {
    let app = router();
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/sessions/{id}/experiment"),
            &json!({ "magnitudePct": 1.5 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn reset_blanks_selections_but_keeps_metrics() {
    let app = router();
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(post_empty(&format!("/api/v1/sessions/{id}/reset")))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["scenarios"][0]["stream"], "");
    assert_eq!(payload["scenarios"][0]["npv"], 1_200_000.0);
}

#[tokio::test]
async fn summary_is_served_as_plain_text() {
    let app = router();
    let id = create_session(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::get(format!("/api/v1/sessions/{id}/summary"))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .expect("content type present")
        .to_str()
        .expect("content type is ascii");
    assert!(content_type.starts_with("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    let text = String::from_utf8(body.to_vec()).expect("summary is utf-8");
    assert!(text.starts_with("Name: My Plan\n"));
    assert!(text.contains("NPV: \u{20B9}12,00,000"));
}

#[tokio::test]
async fn sessions_created_with_custom_scenarios_use_them() {
    let app = router();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/v1/sessions",
            &json!({
                "scenarios": [{
                    "id": "scn-custom",
                    "name": "Fixture plan",
                    "stream": "Commerce",
                    "npv": 900_000.0,
                }],
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["scenarios"][0]["name"], "Fixture plan");
    assert_eq!(payload["totalPoints"], 9);
}

#[tokio::test]
async fn empty_custom_seed_is_unprocessable() {
    let response = router()
        .oneshot(post_json("/api/v1/sessions", &json!({ "scenarios": [] })))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
