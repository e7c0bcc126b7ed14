#![allow(dead_code)]

//! Test infrastructure for chat-server tests

use chat_core::MESSAGE_TOPIC;
use chat_db::{DatabaseTarget, MessageRepository, connect, run_migrations};
use chat_ws::{
    AppState, BroadcastConfig, ConnectionConfig, ConnectionLimits, ConnectionRegistry, MessageBus,
    Metrics, ShutdownCoordinator, Subscription,
};

use std::env;

use axum::{
    body::{Body, Bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use tower::ServiceExt;

pub const MAX_CONTENT_LENGTH: usize = 255;

/// Create a test pool with in-memory SQLite
pub async fn create_test_pool() -> SqlitePool {
    let pool = connect(&DatabaseTarget::InMemory)
        .await
        .expect("Failed to create test database");
    run_migrations(&pool).await.expect("Failed to run migrations");
    pool
}

/// Create AppState for testing
pub async fn create_test_app_state() -> AppState {
    AppState {
        pool: create_test_pool().await,
        bus: MessageBus::new(BroadcastConfig::default()),
        registry: ConnectionRegistry::new(ConnectionLimits { max_total: 100 }),
        metrics: Metrics::new(),
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
        max_content_length: MAX_CONTENT_LENGTH,
    }
}

/// A listener standing in for a delivery connection
pub fn listen(state: &AppState) -> Subscription {
    state.bus.subscribe(MESSAGE_TOPIC)
}

pub async fn stored_count(state: &AppState) -> i64 {
    MessageRepository::new(state.pool.clone())
        .count()
        .await
        .expect("Failed to count messages")
}

/// Run one request through a fresh router
pub async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Bytes) {
    let app = chat_server::build_router(state.clone());
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body)
}

pub fn post_request(
    path: &str,
    content_type: Option<&str>,
    body: impl Into<Body>,
) -> Request<Body> {
    let mut builder = Request::builder().method("POST").uri(path);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(body.into()).unwrap()
}

pub fn get_request(path: &str) -> Request<Body> {
    request("GET", path)
}

/// Bodyless request with an arbitrary method
pub fn request(method: &str, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

/// RAII guard for environment variables - automatically restores on drop
pub struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}
