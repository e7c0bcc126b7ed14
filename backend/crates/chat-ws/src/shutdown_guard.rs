use crate::ShutdownCoordinator;

use tokio::sync::broadcast;

/// Per-task view of the shutdown signal
pub struct ShutdownGuard {
    shutdown_rx: broadcast::Receiver<()>,
}

impl ShutdownGuard {
    pub fn new(coordinator: &ShutdownCoordinator) -> Self {
        Self {
            shutdown_rx: coordinator.subscribe(),
        }
    }

    /// Wait for the shutdown signal. Also returns if the coordinator is gone.
    pub async fn wait(&mut self) {
        let _ = self.shutdown_rx.recv().await;
    }

    /// Non-blocking check, consumes the signal if present
    pub fn poll_shutdown(&mut self) -> bool {
        self.shutdown_rx.try_recv().is_ok()
    }
}
