//! Integration tests for visitor sessions and the popup gate.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, post_empty, post_json};
use promo_core::eligibility::session_key;
use serde_json::{json, Value};

async fn open_session(app: &Router) -> String {
    let response = post_empty(app.clone(), "/api/v1/sessions").await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

fn abc_set() -> Value {
    json!({
        "items": [
            { "id": "A", "active": true, "targetPages": ["home"] },
            { "id": "B", "active": false, "targetPages": ["home"] },
            { "id": "C", "active": true, "targetPages": ["all"] }
        ]
    })
}

async fn check(app: &Router, session: &str, page: &str) -> Value {
    let response = post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session}/eligibility"),
        json!({ "popup_set": abc_set(), "context": { "page": page } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

async fn mark_seen(app: &Router, session: &str, key: &Value) -> Value {
    let response = post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session}/seen"),
        json!({ "session_key": key }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

fn slide_ids(data: &Value) -> Vec<String> {
    data["slides"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["descriptor"]["item_id"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Gate
// ---------------------------------------------------------------------------

#[tokio::test]
async fn abc_scenario_over_http() {
    let app = common::build_test_app();
    let session = open_session(&app).await;

    let first = check(&app, &session, "home").await;
    assert_eq!(first["present"], true);
    assert_eq!(first["delay_ms"], 1500);
    assert_eq!(slide_ids(&first), vec!["A", "C"]);

    let seen = mark_seen(&app, &session, &first["session_key"]).await;
    assert_eq!(seen["newly_recorded"], true);

    let second = check(&app, &session, "home").await;
    assert_eq!(second["present"], false);
    assert_eq!(second["reason"], "already_seen");

    let third = check(&app, &session, "news_detail").await;
    assert_eq!(third["present"], true);
    assert_eq!(slide_ids(&third), vec!["C"]);
    assert_ne!(third["session_key"], first["session_key"]);
}

#[tokio::test]
async fn seen_is_idempotent() {
    let app = common::build_test_app();
    let session = open_session(&app).await;
    let key = check(&app, &session, "home").await["session_key"].clone();

    assert_eq!(mark_seen(&app, &session, &key).await["seen_count"], 1);
    let again = mark_seen(&app, &session, &key).await;
    assert_eq!(again["newly_recorded"], false);
    assert_eq!(again["seen_count"], 1);
}

#[tokio::test]
async fn sessions_are_independent() {
    let app = common::build_test_app();
    let first = open_session(&app).await;
    let second = open_session(&app).await;

    let key = check(&app, &first, "home").await["session_key"].clone();
    mark_seen(&app, &first, &key).await;

    assert_eq!(check(&app, &second, "home").await["present"], true);
}

#[tokio::test]
async fn nothing_eligible_is_reported() {
    let app = common::build_test_app();
    let session = open_session(&app).await;
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/eligibility"),
        json!({
            "popup_set": { "items": [{ "id": "A", "targetPages": ["admin_area"] }] },
            "context": { "page": "home" }
        }),
    )
    .await;

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["present"], false);
    assert_eq!(data["reason"], "nothing_eligible");
    assert_eq!(data["slides"], json!([]));
}

#[tokio::test]
async fn device_context_filters_items() {
    let app = common::build_test_app();
    let session = open_session(&app).await;
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/eligibility"),
        json!({
            "popup_set": { "items": [
                { "id": "m", "targetPages": ["all"], "deviceTarget": "mobile" },
                { "id": "d", "targetPages": ["all"], "deviceTarget": "desktop" }
            ] },
            "context": { "page": "home", "device": "mobile" }
        }),
    )
    .await;

    let data = body_json(response).await["data"].clone();
    assert_eq!(slide_ids(&data), vec!["m"]);
}

#[tokio::test]
async fn preview_ignores_seen_records() {
    let app = common::build_test_app();
    let session = open_session(&app).await;
    let key = check(&app, &session, "home").await["session_key"].clone();
    mark_seen(&app, &session, &key).await;

    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/eligibility"),
        json!({ "popup_set": abc_set(), "mode": "preview", "context": { "page": "jobs_board" } }),
    )
    .await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["present"], true);
    assert_eq!(data["delay_ms"], 0);
    assert_eq!(slide_ids(&data), vec!["A", "B", "C"]);
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_session_is_404() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/sessions/6f1c2a3e-9a55-4c6e-8d3b-2f0b7c1e4d9a/eligibility",
        json!({ "popup_set": abc_set(), "context": { "page": "home" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_session_id_is_400() {
    let app = common::build_test_app();
    let response = post_json(
        app,
        "/api/v1/sessions/not-a-uuid/seen",
        json!({ "session_key": "x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn unknown_page_tag_is_validation_error() {
    let app = common::build_test_app();
    let session = open_session(&app).await;
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/eligibility"),
        json!({ "popup_set": abc_set(), "context": { "page": "checkout" } }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["error"].as_str().unwrap().contains("TargetPage"));
}

#[tokio::test]
async fn malformed_session_key_is_rejected() {
    let app = common::build_test_app();
    let session = open_session(&app).await;
    let response = post_json(
        app,
        &format!("/api/v1/sessions/{session}/seen"),
        json!({ "session_key": "promo_popup_set_123_seen" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn session_capacity_returns_503() {
    let mut config = common::test_config();
    config.max_sessions = 1;
    let app = common::build_test_app_with(config);

    open_session(&app).await;
    let response = post_empty(app, "/api/v1/sessions").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["code"], "UNAVAILABLE");
}

#[tokio::test]
async fn seen_keys_past_session_limit_are_rejected() {
    let mut config = common::test_config();
    config.max_seen_keys_per_session = 2;
    let app = common::build_test_app_with(config);
    let session = open_session(&app).await;

    let first = json!(session_key(["x"]));
    mark_seen(&app, &session, &first).await;
    let data = mark_seen(&app, &session, &json!(session_key(["y"]))).await;
    assert_eq!(data["seen_count"], 2);

    let response = post_json(
        app.clone(),
        &format!("/api/v1/sessions/{session}/seen"),
        json!({ "session_key": session_key(["z"]) }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    // Re-sending a recorded key still succeeds at the limit.
    let data = mark_seen(&app, &session, &first).await;
    assert_eq!(data["newly_recorded"], false);
    assert_eq!(data["seen_count"], 2);

    // Another session has its own allowance.
    let other = open_session(&app).await;
    let data = mark_seen(&app, &other, &json!(session_key(["z"]))).await;
    assert_eq!(data["newly_recorded"], true);
}
