//! API integration tests
//!
//! Drives the Axum router in-process over the in-memory store; no PostgreSQL,
//! Redis, or sockets required.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use integration_tests::test_context;
use news_api::server::create_app;
use news_api::state::AppState;
use news_common::{
    AppConfig, AppSettings, DatabaseConfig, Environment, LifecycleConfig, RedisConfig,
    ServerConfig, SnowflakeConfig,
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config() -> AppConfig {
    AppConfig {
        app: AppSettings {
            name: "news-backend-test".to_string(),
            env: Environment::Development,
        },
        api: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        redis: RedisConfig {
            url: "redis://unused".to_string(),
            max_connections: 1,
        },
        lifecycle: LifecycleConfig::default(),
        snowflake: SnowflakeConfig { worker_id: 0 },
    }
}

fn test_app() -> Router {
    let harness = test_context();
    let state = AppState::new(harness.ctx, test_config());
    create_app(state)
}

async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    user_id: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }

    let request = builder
        .body(Body::from(
            body.map(|b| serde_json::to_vec(&b).unwrap()).unwrap_or_default(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_health_check() {
    let app = test_app();
    let (status, body) = send_json(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_interaction_flow_over_http() {
    let app = test_app();

    // Create a channel
    let (status, channel) = send_json(
        &app,
        Method::POST,
        "/api/v1/channels",
        None,
        Some(json!({ "name": "world-desk" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let channel_id = channel["id"].as_str().unwrap().to_string();

    // Create a headline
    let (status, content) = send_json(
        &app,
        Method::POST,
        "/api/v1/contents",
        None,
        Some(json!({
            "channel_id": channel_id,
            "title": "Big Story",
            "message": "Something happened"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let content_id = content["id"].as_str().unwrap().to_string();

    // Record a like as user 42
    let uri = format!("/api/v1/contents/{content_id}/interactions");
    let (status, summary) = send_json(
        &app,
        Method::POST,
        &uri,
        Some("42"),
        Some(json!({ "interaction_type": "like" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["like_count"], 1);
    assert_eq!(summary["active_button"], "like");

    // Reaction summary agrees
    let uri = format!("/api/v1/contents/{content_id}/reactions");
    let (status, summary) = send_json(&app, Method::GET, &uri, Some("42"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["like_count"], 1);

    // Headline feed contains the item
    let (status, feed) =
        send_json(&app, Method::GET, "/api/v1/contents/headlines", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(feed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_interaction_requires_identity_header() {
    let app = test_app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/api/v1/contents/123/interactions",
        None,
        Some(json!({ "interaction_type": "like" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "MISSING_USER_IDENTITY");
}

#[tokio::test]
async fn test_unknown_interaction_type_is_bad_request() {
    let app = test_app();

    let (_, channel) = send_json(
        &app,
        Method::POST,
        "/api/v1/channels",
        None,
        Some(json!({ "name": "desk" })),
    )
    .await;
    let channel_id = channel["id"].as_str().unwrap().to_string();

    let (_, content) = send_json(
        &app,
        Method::POST,
        "/api/v1/contents",
        None,
        Some(json!({
            "channel_id": channel_id,
            "title": "t",
            "message": "m"
        })),
    )
    .await;
    let content_id = content["id"].as_str().unwrap().to_string();

    let uri = format!("/api/v1/contents/{content_id}/interactions");
    let (status, body) = send_json(
        &app,
        Method::POST,
        &uri,
        Some("7"),
        Some(json!({ "interaction_type": "boost" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INTERACTION");
}

#[tokio::test]
async fn test_missing_content_is_not_found() {
    let app = test_app();
    let (status, body) =
        send_json(&app, Method::GET, "/api/v1/contents/987654", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "UNKNOWN_CONTENT");
}

#[tokio::test]
async fn test_maintenance_endpoints_are_idempotent() {
    let app = test_app();

    let (status, report) = send_json(
        &app,
        Method::POST,
        "/api/v1/maintenance/lifecycle-sweep",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["promoted"], 0);

    let (status, report) = send_json(
        &app,
        Method::POST,
        "/api/v1/maintenance/duplicate-cleanup",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["removed"], 0);
}
