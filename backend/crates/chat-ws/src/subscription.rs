use crate::message_bus::{BusInner, lock_bus};
use crate::{BroadcastMessage, SubscriptionHandle};

use std::sync::{Mutex, Weak};

use tokio::sync::mpsc;

/// Owned listener returned by `MessageBus::subscribe`. Dropping it unsubscribes.
pub struct Subscription {
    handle: SubscriptionHandle,
    receiver: mpsc::Receiver<BroadcastMessage>,
    bus: Weak<Mutex<BusInner>>,
    active: bool,
}

impl Subscription {
    pub(crate) fn new(
        handle: SubscriptionHandle,
        receiver: mpsc::Receiver<BroadcastMessage>,
        bus: Weak<Mutex<BusInner>>,
    ) -> Self {
        Self {
            handle,
            receiver,
            bus,
            active: true,
        }
    }

    pub fn handle(&self) -> &SubscriptionHandle {
        &self.handle
    }

    /// Next payload, or `None` once unsubscribed or the bus is closed
    pub async fn recv(&mut self) -> Option<BroadcastMessage> {
        if !self.active {
            return None;
        }
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Option<BroadcastMessage> {
        if !self.active {
            return None;
        }
        self.receiver.try_recv().ok()
    }

    /// Leave the topic. Safe to call repeatedly and after the bus is gone.
    pub fn unsubscribe(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.receiver.close();

        let Some(inner) = self.bus.upgrade() else {
            return false;
        };
        let removed = lock_bus(&inner).remove(&self.handle);
        removed
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("handle", &self.handle)
            .field("active", &self.active)
            .finish()
    }
}
