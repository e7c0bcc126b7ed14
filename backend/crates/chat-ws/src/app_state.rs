use crate::{
    ConnectionConfig, ConnectionRegistry, DeliveryConnection, MessageBus, MessageRelay, Metrics,
    ShutdownCoordinator, ShutdownGuard, WsError,
};

use chat_core::MESSAGE_TOPIC;

use axum::{
    extract::{
        State,
        ws::{WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
};
use log::{debug, info, warn};
use sqlx::SqlitePool;

/// Shared application state for the HTTP and WebSocket handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub bus: MessageBus,
    pub registry: ConnectionRegistry,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
    /// Upper bound on submitted content, in characters
    pub max_content_length: usize,
}

impl AppState {
    pub fn relay(&self) -> MessageRelay {
        MessageRelay::new(self.pool.clone(), self.bus.clone(), self.metrics.clone())
    }
}

/// Delivery channel upgrade handler.
///
/// The connection is registered and subscribed before the 101 response goes
/// out, so anything published after the handshake completes reaches it.
pub async fn handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let registration = state.registry.register().map_err(|e| {
        warn!("Rejecting delivery connection: {}", e);
        state.metrics.connection_rejected();
        StatusCode::SERVICE_UNAVAILABLE
    })?;

    let subscription = state.bus.subscribe(MESSAGE_TOPIC);
    let shutdown_guard = state.shutdown.subscribe_guard();

    debug!(
        "Upgrading delivery connection {}",
        registration.connection_id()
    );

    let connection = DeliveryConnection::new(
        registration,
        subscription,
        state.config.clone(),
        state.metrics.clone(),
    );

    // A failed upgrade drops the connection, which unsubscribes and deregisters
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, connection, shutdown_guard)))
}

async fn handle_socket(
    socket: WebSocket,
    connection: DeliveryConnection,
    shutdown_guard: ShutdownGuard,
) {
    let connection_id = connection.connection_id();

    match connection.handle(socket, shutdown_guard).await {
        Ok(()) => {}
        Err(e @ WsError::HeartbeatTimeout { .. }) | Err(e @ WsError::ConnectionClosed { .. }) => {
            info!("Connection {connection_id} ended: {e}");
        }
        Err(e) => warn!("Connection {connection_id} error: {e}"),
    }
}
