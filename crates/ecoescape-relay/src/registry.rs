//! Process-wide registry of live push-channel subscribers.
//!
//! Each subscriber owns the receiving half of a bounded queue; the
//! registry keeps the sending halves. A broadcast walks the registry once
//! under a single lock and uses [`mpsc::Sender::try_send`], so a slow or
//! broken subscriber never stalls delivery to the others:
//!
//! - a full queue drops the event for that subscriber only
//! - a closed queue (receiver gone) is pruned from the registry
//!
//! There is no replay buffer. A subscriber only sees events broadcast
//! while it is registered.

use std::collections::HashMap;

use ecoescape_types::{EnergySignal, SubscriberId};
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

/// Handle held by one live subscriber.
///
/// Dropping the handle closes its queue; the registry prunes the entry
/// on the next broadcast. Call [`ConnectionRegistry::unsubscribe`] to
/// remove it immediately.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriberId,
    rx: mpsc::Receiver<EnergySignal>,
}

impl Subscription {
    /// This subscriber's identifier.
    pub const fn id(&self) -> SubscriberId {
        self.id
    }

    /// Wait for the next event.
    ///
    /// Returns `None` once the subscriber has been removed from the
    /// registry and every queued event has been taken.
    pub async fn recv(&mut self) -> Option<EnergySignal> {
        self.rx.recv().await
    }

    /// Take the next queued event without waiting.
    pub fn try_recv(&mut self) -> Option<EnergySignal> {
        self.rx.try_recv().ok()
    }
}

/// Per-broadcast delivery counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Subscribers that got the event queued.
    pub delivered: usize,
    /// Subscribers skipped because their queue was full.
    pub dropped: usize,
    /// Subscribers found disconnected and removed.
    pub pruned: usize,
}

/// Set of currently connected subscribers.
#[derive(Debug)]
pub struct ConnectionRegistry {
    /// Sending half of each subscriber's queue.
    subscribers: Mutex<HashMap<SubscriberId, mpsc::Sender<EnergySignal>>>,

    /// Queue bound for new subscribers.
    buffer: usize,
}

impl ConnectionRegistry {
    /// Create an empty registry whose subscribers queue up to `buffer`
    /// events each. A zero buffer is raised to one.
    pub fn new(buffer: usize) -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
            buffer: buffer.max(1),
        }
    }

    /// Register a new subscriber.
    pub async fn subscribe(&self) -> Subscription {
        let (tx, rx) = mpsc::channel(self.buffer);
        let id = SubscriberId::new();
        let mut subscribers = self.subscribers.lock().await;
        subscribers.insert(id, tx);
        debug!(subscriber = %id, total = subscribers.len(), "subscriber registered");
        Subscription { id, rx }
    }

    /// Remove a subscriber. Removing an unknown or already removed ID is
    /// a no-op.
    ///
    /// Returns `true` if the subscriber was registered.
    pub async fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut subscribers = self.subscribers.lock().await;
        let removed = subscribers.remove(&id).is_some();
        if removed {
            debug!(subscriber = %id, total = subscribers.len(), "subscriber removed");
        }
        removed
    }

    /// Number of registered subscribers.
    pub async fn len(&self) -> usize {
        self.subscribers.lock().await.len()
    }

    /// Whether no subscriber is registered.
    pub async fn is_empty(&self) -> bool {
        self.subscribers.lock().await.is_empty()
    }

    /// Queue `signal` for every subscriber registered right now.
    ///
    /// Never waits on a subscriber. An event broadcast to an empty
    /// registry is lost.
    pub async fn broadcast(&self, signal: &EnergySignal) -> BroadcastReport {
        let mut report = BroadcastReport::default();
        let mut closed = Vec::new();
        let mut subscribers = self.subscribers.lock().await;

        for (id, tx) in subscribers.iter() {
            match tx.try_send(signal.clone()) {
                Ok(()) => report.delivered = report.delivered.saturating_add(1),
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!(subscriber = %id, "subscriber queue full, event dropped");
                    report.dropped = report.dropped.saturating_add(1);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => closed.push(*id),
            }
        }

        for id in closed {
            subscribers.remove(&id);
            report.pruned = report.pruned.saturating_add(1);
            debug!(subscriber = %id, "pruned disconnected subscriber");
        }

        report
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new(16)
    }
}
