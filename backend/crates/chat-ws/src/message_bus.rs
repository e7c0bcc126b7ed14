use crate::{BroadcastConfig, BroadcastMessage, Subscription, SubscriptionHandle};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::{debug, info, warn};
use tokio::sync::mpsc::{self, error::TrySendError};

/// Topic-keyed fan-out of text payloads to live subscribers
///
/// Delivery is at-most-once and live-only: a payload reaches the listeners
/// subscribed when `publish` runs and is retained nowhere afterwards.
pub struct MessageBus {
    inner: Arc<Mutex<BusInner>>,
    config: BroadcastConfig,
}

pub(crate) struct BusInner {
    topics: HashMap<String, TopicSubscribers>,
    next_id: u64,
    closed: bool,
}

struct TopicSubscribers {
    listeners: HashMap<u64, mpsc::Sender<BroadcastMessage>>,
}

impl BusInner {
    /// Remove one listener, dropping the topic entry once it is empty
    pub(crate) fn remove(&mut self, handle: &SubscriptionHandle) -> bool {
        let Some(subscribers) = self.topics.get_mut(handle.topic()) else {
            return false;
        };

        let removed = subscribers.listeners.remove(&handle.id()).is_some();
        let remaining = subscribers.listeners.len();

        if remaining == 0 {
            self.topics.remove(handle.topic());
            debug!("Removed empty topic {}", handle.topic());
        } else if removed {
            debug!(
                "Unsubscribed {} from topic {} ({} remaining)",
                handle.id(),
                handle.topic(),
                remaining
            );
        }

        removed
    }
}

pub(crate) fn lock_bus(inner: &Mutex<BusInner>) -> MutexGuard<'_, BusInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MessageBus {
    pub fn new(config: BroadcastConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(BusInner {
                topics: HashMap::new(),
                next_id: 0,
                closed: false,
            })),
            config,
        }
    }

    /// Register a listener on `topic`.
    ///
    /// After `close()` this still succeeds but the returned subscription is
    /// already ended and `recv()` yields `None` immediately.
    pub fn subscribe(&self, topic: &str) -> Subscription {
        let (sender, receiver) = mpsc::channel(self.config.subscriber_capacity.max(1));
        let mut inner = lock_bus(&self.inner);

        let id = inner.next_id;
        inner.next_id += 1;
        let handle = SubscriptionHandle::new(id, topic);

        if inner.closed {
            debug!("Bus closed, subscription {} to {} starts ended", id, topic);
            drop(sender);
            return Subscription::new(handle, receiver, Weak::new());
        }

        let subscribers = inner
            .topics
            .entry(topic.to_string())
            .or_insert_with(|| {
                info!("Created topic {}", topic);
                TopicSubscribers {
                    listeners: HashMap::new(),
                }
            });
        subscribers.listeners.insert(id, sender);

        debug!(
            "Subscribed {} to topic {} ({} total subscribers)",
            id,
            topic,
            subscribers.listeners.len()
        );

        Subscription::new(handle, receiver, Arc::downgrade(&self.inner))
    }

    /// Remove a listener. Returns true only for the call that removed it.
    pub fn unsubscribe(&self, handle: &SubscriptionHandle) -> bool {
        lock_bus(&self.inner).remove(handle)
    }

    /// Fan `payload` out to every current listener of `topic`.
    ///
    /// Never waits: a listener whose queue is full misses this payload.
    /// Returns how many listeners accepted it.
    pub fn publish(&self, topic: &str, payload: &str) -> usize {
        let mut inner = lock_bus(&self.inner);

        let Some(subscribers) = inner.topics.get_mut(topic) else {
            debug!("Publish to {} with no subscribers", topic);
            return 0;
        };

        let message = BroadcastMessage::new(topic, payload);
        let mut delivered = 0;

        subscribers
            .listeners
            .retain(|id, sender| match sender.try_send(message.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(TrySendError::Full(_)) => {
                    warn!("Subscriber {} on topic {} is full, message dropped", id, topic);
                    true
                }
                Err(TrySendError::Closed(_)) => {
                    debug!("Pruning closed subscriber {} on topic {}", id, topic);
                    false
                }
            });

        if subscribers.listeners.is_empty() {
            inner.topics.remove(topic);
        }

        debug!("Published to {} ({} receivers)", topic, delivered);
        delivered
    }

    /// Drop every listener queue. Pending `recv()` calls return `None` once
    /// their already-queued payloads are drained.
    pub fn close(&self) {
        let mut inner = lock_bus(&self.inner);
        if inner.closed {
            return;
        }
        inner.closed = true;
        let topics = inner.topics.len();
        inner.topics.clear();
        info!("Message bus closed ({} topics released)", topics);
    }

    pub fn is_closed(&self) -> bool {
        lock_bus(&self.inner).closed
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        lock_bus(&self.inner)
            .topics
            .get(topic)
            .map(|s| s.listeners.len())
            .unwrap_or(0)
    }

    pub fn topic_count(&self) -> usize {
        lock_bus(&self.inner).topics.len()
    }
}

impl Default for MessageBus {
    fn default() -> Self {
        Self::new(BroadcastConfig::default())
    }
}

impl Clone for MessageBus {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            config: self.config.clone(),
        }
    }
}
