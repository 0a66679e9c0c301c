//! Integration tests for hexgrid-server API

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use hexgrid_core::GridConfig;
use hexgrid_server::{create_router, ServerConfig, ServerState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    let config = ServerConfig {
        grid: GridConfig {
            width: 4,
            height: 4,
            hex_radius: 10.0,
            ..GridConfig::default()
        },
        ..ServerConfig::default()
    };
    let state = Arc::new(ServerState::new(config.grid.clone()).unwrap());
    create_router(&config, state)
}

fn capped_app(max_sessions: usize) -> Router {
    let config = ServerConfig {
        max_sessions,
        ..ServerConfig::default()
    };
    let state = ServerState::new(config.grid.clone())
        .unwrap()
        .with_max_sessions(config.max_sessions);
    create_router(&config, Arc::new(state))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn new_session(app: &Router) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/sessions")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

async fn event(app: &Router, id: &str, body: Value) -> Value {
    let (status, json) = send(app, post_json(&format!("/api/sessions/{id}/events"), body)).await;
    assert_eq!(status, StatusCode::OK, "{json}");
    json
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = test_app();
    let (status, json) = send(&app, get("/api/status")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["sessions"], 0);
    assert_eq!(json["grid_width"], 4);
}

#[tokio::test]
async fn test_session_lifecycle() {
    let app = test_app();
    let id = new_session(&app).await;

    let (_, json) = send(&app, get("/api/sessions")).await;
    assert_eq!(json["sessions"], json!([id]));

    let (status, json) = send(&app, get(&format!("/api/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["width"], 4);
    assert_eq!(json["height"], 4);
    assert_eq!(json["selected"], "PLAYER");
    assert_eq!(json["dragging"], false);
    assert_eq!(json["exit"], Value::Null);

    let tiles = json["tiles"].as_array().unwrap();
    assert_eq!(tiles.len(), 16);
    assert_eq!(tiles[0]["tile"], "EMPTY");
    assert_eq!(tiles[0]["corners"].as_array().unwrap().len(), 6);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/api/sessions/{id}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, get(&format!("/api/sessions/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_click_event_paints_tile() {
    let app = test_app();
    let id = new_session(&app).await;

    let json = event(&app, &id, json!({"type": "pointer_down", "x": 0.0, "y": 0.0})).await;
    assert_eq!(json["gesture"], Value::Null);

    let json = event(&app, &id, json!({"type": "pointer_up", "x": 0.0, "y": 0.0})).await;
    assert_eq!(json["gesture"]["kind"], "click");
    assert_eq!(json["changes"][0]["hex"], json!({"q": 0, "r": 0}));
    assert_eq!(json["changes"][0]["to"], "PLAYER");

    let (_, json) = send(&app, get(&format!("/api/sessions/{id}"))).await;
    assert_eq!(json["tiles"][0]["tile"], "PLAYER");
}

#[tokio::test]
async fn test_exit_and_drag_events() {
    let app = test_app();
    let id = new_session(&app).await;

    let json = event(&app, &id, json!({"type": "key", "key": "4"})).await;
    assert_eq!(json["selected"], "EXIT");

    // Click at the centre of (0, 1): x = apothem, y = 1.5 * radius
    event(&app, &id, json!({"type": "pointer_down", "x": 8.66, "y": 15.0})).await;
    event(&app, &id, json!({"type": "pointer_up", "x": 8.66, "y": 15.0})).await;

    let (_, json) = send(&app, get(&format!("/api/sessions/{id}"))).await;
    assert_eq!(json["exit"], json!({"q": 0, "r": 1}));

    // Dragging the exit away does nothing
    event(&app, &id, json!({"type": "pointer_down", "x": 8.66, "y": 15.0})).await;
    let json = event(&app, &id, json!({"type": "pointer_up", "x": 43.3, "y": 15.0})).await;
    assert_eq!(json["gesture"]["kind"], "drag");
    assert_eq!(json["changes"], json!([]));
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let app = test_app();
    let a = new_session(&app).await;
    let b = new_session(&app).await;
    assert_ne!(a, b);

    event(&app, &a, json!({"type": "select", "tile": "ENEMY"})).await;
    event(&app, &a, json!({"type": "pointer_down", "x": 0.0, "y": 0.0})).await;
    event(&app, &a, json!({"type": "pointer_up", "x": 0.0, "y": 0.0})).await;

    let (_, json) = send(&app, get(&format!("/api/sessions/{b}"))).await;
    assert_eq!(json["selected"], "PLAYER");
    assert_eq!(json["tiles"][0]["tile"], "EMPTY");
}

#[tokio::test]
async fn test_unknown_session_event() {
    let app = test_app();
    let (status, json) = send(
        &app,
        post_json("/api/sessions/nope/events", json!({"type": "key", "key": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "session not found: nope");
}

#[tokio::test]
async fn test_session_limit() {
    let app = capped_app(2);
    let first = new_session(&app).await;
    new_session(&app).await;

    let create = || {
        Request::builder()
            .method("POST")
            .uri("/api/sessions")
            .body(Body::empty())
            .unwrap()
    };
    let (status, json) = send(&app, create()).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "session limit reached (2 open)");

    // Deleting one frees a slot
    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/sessions/{first}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, delete).await;
    assert!(status.is_success());
    let (status, _) = send(&app, create()).await;
    assert_eq!(status, StatusCode::CREATED);
}
