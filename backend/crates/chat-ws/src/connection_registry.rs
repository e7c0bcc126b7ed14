use crate::{
    ConnectionId, ConnectionInfo, ConnectionLimits, Registration, Result as WsErrorResult, WsError,
};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use error_location::ErrorLocation;
use log::{info, warn};

/// Registry for tracking active delivery connections
pub struct ConnectionRegistry {
    inner: Arc<Mutex<RegistryInner>>,
    limits: ConnectionLimits,
}

struct RegistryInner {
    /// All active connections by connection_id
    connections: HashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    pub fn new(limits: ConnectionLimits) -> Self {
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                connections: HashMap::new(),
            })),
            limits,
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new connection. The returned guard unregisters it on drop.
    #[track_caller]
    pub fn register(&self) -> WsErrorResult<Registration> {
        let mut inner = self.lock();

        if inner.connections.len() >= self.limits.max_total {
            warn!(
                "Total connection limit reached: {}/{}",
                inner.connections.len(),
                self.limits.max_total
            );
            return Err(WsError::ConnectionLimitExceeded {
                current: inner.connections.len(),
                max: self.limits.max_total,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let connection_id = ConnectionId::new();
        let info = ConnectionInfo {
            connection_id,
            connected_at: chrono::Utc::now(),
        };

        inner.connections.insert(connection_id, info.clone());
        info!(
            "Registered connection {connection_id} ({} total)",
            inner.connections.len()
        );

        Ok(Registration::new(info, self.clone()))
    }

    /// Unregister a connection. Returns false if it was already gone.
    pub fn unregister(&self, connection_id: ConnectionId) -> bool {
        let mut inner = self.lock();

        let removed = inner.connections.remove(&connection_id).is_some();
        if removed {
            info!(
                "Unregistered connection {connection_id} ({} total remaining)",
                inner.connections.len()
            );
        }
        removed
    }

    pub fn get(&self, connection_id: ConnectionId) -> Option<ConnectionInfo> {
        self.lock().connections.get(&connection_id).cloned()
    }

    pub fn total_count(&self) -> usize {
        self.lock().connections.len()
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            limits: self.limits.clone(),
        }
    }
}
