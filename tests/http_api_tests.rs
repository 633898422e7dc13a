//! HTTP API integration tests

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use kitchen_assistant::recognition::{EngineFactory, ScriptedEngineFactory, UnavailableEngineFactory};
use kitchen_assistant::{create_router, AppState, Assistant, SessionConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

mod common;
use common::Harness;

/// Build a router over an assistant wired to test doubles
fn build_test_router(harness: &Harness, factory: Arc<dyn EngineFactory>) -> axum::Router {
    let assistant = Assistant::new(factory, SessionConfig::default(), Arc::new(harness.dispatcher()));
    create_router(AppState::new(Arc::new(assistant)))
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_endpoint() {
    let harness = Harness::new();
    let app = build_test_router(&harness, Arc::new(ScriptedEngineFactory::new()));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
}

#[tokio::test]
async fn test_submit_command() {
    let harness = Harness::new();
    let app = build_test_router(&harness, Arc::new(ScriptedEngineFactory::new()));

    let (status, body) = send(
        &app,
        "POST",
        "/assistant/commands",
        Some(json!({ "text": "What's the weather" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["transcript"], "What's the weather");
    assert_eq!(body["intent"], "check_weather");
    assert_eq!(body["response"], "The current weather is: clear sky, temperature is 21°C.");
}

#[tokio::test]
async fn test_empty_command_is_rejected() {
    let harness = Harness::new();
    let app = build_test_router(&harness, Arc::new(ScriptedEngineFactory::new()));

    let (status, body) = send(&app, "POST", "/assistant/commands", Some(json!({ "text": "   " }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(harness.total_calls(), 0);
}

#[tokio::test]
async fn test_listening_lifecycle() {
    let harness = Harness::new();
    let factory = Arc::new(ScriptedEngineFactory::new());
    let app = build_test_router(&harness, factory.clone());

    let (status, body) = send(&app, "POST", "/assistant/listen/start", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "listening");

    let (status, _) = send(&app, "POST", "/assistant/listen/start", None).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "GET", "/assistant/status", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["state"], "listening");

    let (status, body) = send(&app, "POST", "/assistant/listen/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "idle");

    let (_, body) = send(&app, "GET", "/assistant/status", None).await;
    assert_eq!(body["session"]["state"], "idle");
    assert_eq!(factory.created(), 1);
    assert_eq!(factory.stops(), 1);
}

#[tokio::test]
async fn test_start_without_recognition_capability() {
    let harness = Harness::new();
    let app = build_test_router(&harness, Arc::new(UnavailableEngineFactory));

    let (status, body) = send(&app, "POST", "/assistant/listen/start", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().unwrap().contains("not available"));
}

#[tokio::test]
async fn test_interrupt_when_silent() {
    let harness = Harness::new();
    let app = build_test_router(&harness, Arc::new(ScriptedEngineFactory::new()));

    let (status, body) = send(&app, "POST", "/assistant/speech/interrupt", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "interrupted": false }));
}

#[tokio::test]
async fn test_status_reports_pending_item_details() {
    let harness = Harness::new();
    let app = build_test_router(&harness, Arc::new(ScriptedEngineFactory::new()));

    let (_, body) = send(&app, "GET", "/assistant/status", None).await;
    assert_eq!(body["awaiting_item_details"], false);
    assert!(body["latest"].is_null());

    send(
        &app,
        "POST",
        "/assistant/commands",
        Some(json!({ "text": "add items to my pantry" })),
    )
    .await;

    let (_, body) = send(&app, "GET", "/assistant/status", None).await;
    assert_eq!(body["awaiting_item_details"], true);
    assert_eq!(body["latest"]["intent"], "add_items_prompt");
    assert_eq!(body["session"]["state"], "idle");
}
