#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use leadhub::config::{AppState, Config};
use leadhub::db::InMemoryKvStore;
use leadhub::services::lead_factory::ScoreSource;

/// Cycles through a fixed list of scores so assertions can rely on them.
pub struct ScriptedScores {
    scores: Vec<u8>,
    next: AtomicUsize,
}

impl ScriptedScores {
    pub fn new(scores: &[u8]) -> Self {
        Self {
            scores: scores.to_vec(),
            next: AtomicUsize::new(0),
        }
    }
}

impl ScoreSource for ScriptedScores {
    fn next_score(&self) -> u8 {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.scores[i % self.scores.len()]
    }
}

/// Build the application over an in-memory store with no simulated latency.
pub fn build_test_app(scores: &[u8]) -> Router {
    let config = Config {
        crm_connect_latency: Duration::ZERO,
        crm_sync_latency: Duration::ZERO,
        ..Config::default()
    };
    let state = AppState::with_store(
        config,
        Arc::new(InMemoryKvStore::new()),
        Arc::new(ScriptedScores::new(scores)),
    );
    leadhub::app(state)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>, Option<String>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec(), content_type)
}

pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let (status, bytes, _) = send(app, method, uri, body).await;
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
