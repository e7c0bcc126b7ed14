use crate::{
    ConnectionConfig, ConnectionId, Metrics, Registration, Result as WsErrorResult, ShutdownGuard,
    Subscription, WsError,
};

use std::ops::ControlFlow;
use std::panic::Location;
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::time::{Instant, interval_at, timeout};
use tracing::{Instrument, info_span};

/// How long the send task may take to flush once the connection is ending
const SEND_DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Push-only WebSocket connection that forwards every bus payload as a text frame
pub struct DeliveryConnection {
    registration: Registration,
    subscription: Subscription,
    config: ConnectionConfig,
    metrics: Metrics,
}

impl DeliveryConnection {
    pub fn new(
        registration: Registration,
        subscription: Subscription,
        config: ConnectionConfig,
        metrics: Metrics,
    ) -> Self {
        Self {
            registration,
            subscription,
            config,
            metrics,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.registration.connection_id()
    }

    /// Handle the connection lifecycle until close, then unsubscribe and deregister
    pub async fn handle(
        self,
        socket: WebSocket,
        shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        let span = info_span!("delivery_connection", connection_id = %self.connection_id());
        self.run(socket, shutdown_guard).instrument(span).await
    }

    async fn run(self, socket: WebSocket, mut shutdown_guard: ShutdownGuard) -> WsErrorResult<()> {
        let Self {
            mut registration,
            mut subscription,
            config,
            metrics,
        } = self;
        let connection_id = registration.connection_id();

        info!("Delivery connection {} established", connection_id);
        metrics.connection_established();

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Bounded per-connection send queue, drained by the send task
        let (tx, mut rx) = mpsc::channel::<Message>(config.send_buffer_size.max(1));

        let mut send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    return;
                }
            }
            let _ = ws_sender.close().await;
        });
        let mut send_task_finished = false;

        let heartbeat_period = config.heartbeat_interval();
        let heartbeat_timeout = config.heartbeat_timeout();
        let mut heartbeat = interval_at(Instant::now() + heartbeat_period, heartbeat_period);
        let mut last_seen = Instant::now();

        let result = loop {
            tokio::select! {
                frame = ws_receiver.next() => {
                    match frame {
                        Some(Ok(frame)) => {
                            last_seen = Instant::now();
                            match frame {
                                Message::Close(_) => {
                                    info!("Connection {} sent close frame", connection_id);
                                    break Ok(());
                                }
                                Message::Ping(data) => {
                                    let pong = Message::Pong(data);
                                    if let ControlFlow::Break(outcome) = enqueue(&tx, pong) {
                                        break outcome;
                                    }
                                }
                                Message::Pong(_) => {}
                                Message::Text(text) => {
                                    debug!(
                                        "Ignoring {} byte text frame from connection {}",
                                        text.as_str().len(),
                                        connection_id
                                    );
                                }
                                Message::Binary(data) => {
                                    debug!(
                                        "Ignoring {} byte binary frame from connection {}",
                                        data.len(),
                                        connection_id
                                    );
                                }
                            }
                        }
                        Some(Err(e)) => {
                            info!("Socket error on connection {}: {}", connection_id, e);
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {}", e),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        None => {
                            info!("Connection {} closed by client", connection_id);
                            break Ok(());
                        }
                    }
                }

                delivery = subscription.recv() => {
                    match delivery {
                        Some(message) => {
                            let frame = Message::text(message.payload.to_string());
                            if let ControlFlow::Break(outcome) = enqueue(&tx, frame) {
                                break outcome;
                            }
                            metrics.message_sent();
                        }
                        None => {
                            info!("Bus closed, ending connection {}", connection_id);
                            break Ok(());
                        }
                    }
                }

                _ = &mut send_task, if !send_task_finished => {
                    send_task_finished = true;
                    debug!("Write to connection {} failed", connection_id);
                    break Err(WsError::ConnectionClosed {
                        reason: "write failed".to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    });
                }

                _ = heartbeat.tick() => {
                    if last_seen.elapsed() > heartbeat_timeout {
                        warn!(
                            "Connection {} silent for {:?}, closing",
                            connection_id,
                            last_seen.elapsed()
                        );
                        break Err(WsError::HeartbeatTimeout {
                            timeout_secs: config.heartbeat_timeout_secs,
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                    let ping = Message::Ping(Bytes::new());
                    if let ControlFlow::Break(outcome) = enqueue(&tx, ping) {
                        break outcome;
                    }
                }

                _ = shutdown_guard.wait() => {
                    info!("Shutting down connection {} gracefully", connection_id);
                    break Ok(());
                }
            }
        };

        // Cleanup: unsubscribe first so no publish targets a closing socket
        subscription.unsubscribe();
        drop(tx);
        if !send_task_finished && timeout(SEND_DRAIN_TIMEOUT, &mut send_task).await.is_err() {
            send_task.abort();
        }
        registration.release();

        metrics.connection_closed(close_reason(&result));
        info!("Delivery connection {} closed", connection_id);

        result
    }
}

/// Queue a frame for the send task. `Break` carries the connection's final outcome.
pub(crate) fn enqueue(
    tx: &mpsc::Sender<Message>,
    msg: Message,
) -> ControlFlow<WsErrorResult<()>> {
    match tx.try_send(msg) {
        Ok(()) => ControlFlow::Continue(()),
        Err(TrySendError::Full(_)) => ControlFlow::Break(Err(WsError::SendBufferFull {
            location: ErrorLocation::from(Location::caller()),
        })),
        // Send task gone, the socket is already closed
        Err(TrySendError::Closed(_)) => ControlFlow::Break(Ok(())),
    }
}

pub(crate) fn close_reason(result: &WsErrorResult<()>) -> &'static str {
    match result {
        Ok(()) => "normal",
        Err(WsError::HeartbeatTimeout { .. }) => "heartbeat",
        Err(WsError::SendBufferFull { .. }) => "slow_client",
        Err(_) => "error",
    }
}
