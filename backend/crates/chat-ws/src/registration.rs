use crate::{ConnectionId, ConnectionInfo, ConnectionRegistry};

/// Slot held in the `ConnectionRegistry` for one connection
pub struct Registration {
    info: ConnectionInfo,
    registry: ConnectionRegistry,
    active: bool,
}

impl Registration {
    pub(crate) fn new(info: ConnectionInfo, registry: ConnectionRegistry) -> Self {
        Self {
            info,
            registry,
            active: true,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.info.connection_id
    }

    /// Give the slot back. Later calls and the eventual drop do nothing.
    pub fn release(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.registry.unregister(self.info.connection_id)
    }
}

impl Drop for Registration {
    fn drop(&mut self) {
        self.release();
    }
}
