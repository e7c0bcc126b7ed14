use crate::build_router;
use crate::error::{Result as ServerErrorResult, ServerError};

use chat_config::Config;
use chat_db::DatabaseTarget;
use chat_ws::{
    AppState, BroadcastConfig, ConnectionConfig, ConnectionLimits, ConnectionRegistry, MessageBus,
    Metrics, ShutdownCoordinator, ShutdownGuard,
};

use std::net::SocketAddr;

use axum::Router;
use log::info;
use tokio::net::TcpListener;

/// The running relay: owns the listener, the store pool and the bus
pub struct Application {
    listener: TcpListener,
    router: Router,
    state: AppState,
    shutdown_guard: ShutdownGuard,
}

impl Application {
    /// Open the store, prepare the schema and bind the listener
    pub async fn build(config: &Config) -> ServerErrorResult<Self> {
        let target = match config.database_path()? {
            Some(path) => {
                info!("Connecting to database: {}", path.display());
                DatabaseTarget::File(path)
            }
            None => DatabaseTarget::InMemory,
        };

        let pool = chat_db::connect(&target).await?;
        info!("Running database migrations...");
        chat_db::run_migrations(&pool).await?;
        info!("Migrations complete");

        let bus = MessageBus::new(BroadcastConfig {
            subscriber_capacity: config.bus.subscriber_capacity,
        });

        let registry = ConnectionRegistry::new(ConnectionLimits {
            max_total: config.server.max_connections,
        });

        let connection_config = ConnectionConfig {
            send_buffer_size: config.websocket.send_buffer_size,
            heartbeat_interval_secs: config.websocket.heartbeat_interval_secs,
            heartbeat_timeout_secs: config.websocket.heartbeat_timeout_secs,
        };

        let shutdown = ShutdownCoordinator::new();
        // Subscribed now so a shutdown requested before run() is not lost
        let shutdown_guard = shutdown.subscribe_guard();

        let state = AppState {
            pool,
            bus,
            registry,
            metrics: Metrics::new(),
            shutdown,
            config: connection_config,
            max_content_length: config.validation.max_content_length,
        };

        let router = build_router(state.clone());

        let bind_addr = config.bind_addr();
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| ServerError::Io {
                context: format!("binding {}", bind_addr),
                source: e,
            })?;

        let application = Self {
            listener,
            router,
            state,
            shutdown_guard,
        };
        info!("Server listening on {}", application.local_addr()?);

        Ok(application)
    }

    /// Actual bound address (differs from config when port is 0)
    pub fn local_addr(&self) -> ServerErrorResult<SocketAddr> {
        self.listener.local_addr().map_err(|e| ServerError::Io {
            context: "reading local address".to_string(),
            source: e,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn shutdown_coordinator(&self) -> ShutdownCoordinator {
        self.state.shutdown.clone()
    }

    /// Serve until shutdown, then close the bus and the pool
    pub async fn run(self) -> ServerErrorResult<()> {
        let Self {
            listener,
            router,
            state,
            mut shutdown_guard,
        } = self;

        info!("Server ready to accept connections");
        let served = axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown_guard.wait().await;
                info!("No longer accepting connections");
            })
            .await;

        state.bus.close();
        state.pool.close().await;
        info!("Graceful shutdown complete");

        served.map_err(|e| ServerError::Io {
            context: "serving".to_string(),
            source: e,
        })
    }
}
