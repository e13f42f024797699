#![allow(dead_code)]

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use beacon_events::BusConfig;
use http_body_util::BodyExt;
use tower::ServiceExt;

use beacon_api::config::ServerConfig;
use beacon_api::router::build_app_router;
use beacon_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses a small long-poll ceiling and a short heartbeat so that timing
/// sensitive tests finish quickly.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        bus: BusConfig {
            capacity: 500,
            heartbeat: Duration::from_secs(20),
            max_wait: Duration::from_secs(5),
            source_name: "beacon".to_string(),
        },
    }
}

/// Build the full application router (same middleware stack as `main.rs`)
/// and return the state alongside it so tests can publish directly.
pub fn build_test_app() -> (Router, AppState) {
    build_test_app_with(test_config())
}

pub fn build_test_app_with(config: ServerConfig) -> (Router, AppState) {
    let state = AppState::new(config);
    (build_app_router(state.clone()), state)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect the full response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a streaming body until `done` accepts the accumulated text or the
/// timeout elapses. Returns everything read so far.
pub async fn read_stream_until(
    body: &mut Body,
    timeout: Duration,
    done: impl Fn(&str) -> bool,
) -> String {
    let mut text = String::new();
    let _ = tokio::time::timeout(timeout, async {
        while let Some(frame) = body.frame().await {
            let frame = frame.unwrap();
            if let Some(data) = frame.data_ref() {
                text.push_str(std::str::from_utf8(data).unwrap());
            }
            if done(&text) {
                break;
            }
        }
    })
    .await;
    text
}

/// Whether an SSE block is a `ping` heartbeat.
pub fn is_ping(block: &str) -> bool {
    block
        .lines()
        .any(|line| line.starts_with("event:") && line.trim_end().ends_with("ping"))
}

/// Count the heartbeat blocks in raw SSE text.
pub fn ping_count(text: &str) -> usize {
    text.split("\n\n").filter(|block| is_ping(block)).count()
}

/// Extract the JSON payload of every data block that is not a ping.
pub fn data_frames(text: &str) -> Vec<serde_json::Value> {
    text.split("\n\n")
        .filter(|block| !is_ping(block))
        .filter_map(|block| {
            block
                .lines()
                .find_map(|line| line.strip_prefix("data:"))
                .and_then(|data| serde_json::from_str(data.trim_start()).ok())
        })
        .collect()
}
