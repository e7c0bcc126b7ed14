#![allow(dead_code)]

use chat_db::{DatabaseTarget, connect, run_migrations};
use chat_ws::{
    AppState, BroadcastConfig, ConnectionConfig, ConnectionLimits, ConnectionRegistry,
    DISPLAY_MESSAGES_PATH, MessageBus, Metrics, ShutdownCoordinator,
};

use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::TestServer;

/// Configuration for test server instances
#[derive(Debug, Clone)]
pub struct TestServerConfig {
    pub max_connections_total: usize,
    pub subscriber_capacity: usize,
    pub send_buffer_size: usize,
    pub heartbeat_interval_secs: u64,
    pub heartbeat_timeout_secs: u64,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            max_connections_total: 100,
            subscriber_capacity: 1000,
            send_buffer_size: 100,
            heartbeat_interval_secs: 30,
            heartbeat_timeout_secs: 60,
        }
    }
}

impl TestServerConfig {
    /// Create config with strict connection limits (for limit tests)
    pub fn with_strict_limits() -> Self {
        Self {
            max_connections_total: 2,
            ..Default::default()
        }
    }

    /// Create config with a short heartbeat (for silent-client tests)
    pub fn with_fast_heartbeat() -> Self {
        Self {
            heartbeat_interval_secs: 1,
            heartbeat_timeout_secs: 2,
            ..Default::default()
        }
    }
}

/// Test server with access to AppState for testing
pub struct TestServerWithState {
    pub server: TestServer,
    pub app_state: AppState,
}

pub async fn create_test_server() -> TestServerWithState {
    create_test_server_with_config(TestServerConfig::default()).await
}

pub async fn create_test_server_with_config(config: TestServerConfig) -> TestServerWithState {
    let app_state = create_app_state(config).await;
    create_test_server_for_state(app_state)
}

/// Serve the delivery channel over an existing state, e.g. one sharing its bus
pub fn create_test_server_for_state(app_state: AppState) -> TestServerWithState {
    let router = Router::new()
        .route(DISPLAY_MESSAGES_PATH, get(chat_ws::handler))
        .with_state(app_state.clone());

    let server = TestServer::builder()
        .http_transport()
        .build(router)
        .expect("Failed to create test server");

    TestServerWithState { server, app_state }
}

pub async fn create_app_state(config: TestServerConfig) -> AppState {
    let pool = connect(&DatabaseTarget::InMemory)
        .await
        .expect("Failed to open in-memory database");
    run_migrations(&pool).await.expect("Failed to run migrations");

    AppState {
        pool,
        bus: MessageBus::new(BroadcastConfig {
            subscriber_capacity: config.subscriber_capacity,
        }),
        registry: ConnectionRegistry::new(ConnectionLimits {
            max_total: config.max_connections_total,
        }),
        metrics: Metrics::default(),
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig {
            send_buffer_size: config.send_buffer_size,
            heartbeat_interval_secs: config.heartbeat_interval_secs,
            heartbeat_timeout_secs: config.heartbeat_timeout_secs,
        },
        max_content_length: 255,
    }
}

/// Poll `condition` until it holds or two seconds pass
pub async fn wait_until(condition: impl FnMut() -> bool) -> bool {
    wait_until_within(Duration::from_secs(2), condition).await
}

pub async fn wait_until_within(limit: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}
