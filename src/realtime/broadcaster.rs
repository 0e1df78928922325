//! Fan-out of task change events to connected websocket clients.

use std::collections::HashMap;

use parking_lot::RwLock;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::realtime_event::RealtimeEvent;

/// Messages a single slow subscriber may have queued before it is dropped.
pub const SUBSCRIBER_CAPACITY: usize = 64;

/// Registry of live subscribers keyed by connection id.
///
/// A subscriber whose channel is closed or full at broadcast time is
/// removed; it never blocks delivery to the others.
pub struct Broadcaster {
    subscribers: RwLock<HashMap<Uuid, mpsc::Sender<String>>>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
        }
    }

    /// Open a bounded channel for a new subscriber and register its sender.
    pub fn subscribe(&self) -> (Uuid, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(SUBSCRIBER_CAPACITY);
        (self.connect(tx), rx)
    }

    pub fn connect(&self, sender: mpsc::Sender<String>) -> Uuid {
        let id = Uuid::new_v4();
        self.subscribers.write().insert(id, sender);
        debug!(subscriber = %id, "realtime subscriber connected");
        id
    }

    /// Unknown ids are ignored.
    pub fn disconnect(&self, id: Uuid) {
        if self.subscribers.write().remove(&id).is_some() {
            debug!(subscriber = %id, "realtime subscriber disconnected");
        }
    }

    /// Serialize once and hand the text to every subscriber.
    /// Returns how many subscribers accepted it.
    pub fn broadcast(&self, event: &RealtimeEvent) -> usize {
        let text = match serde_json::to_string(event) {
            Ok(text) => text,
            Err(e) => {
                warn!(event_type = event.kind(), error = %e, "failed to serialize realtime event");
                return 0;
            }
        };

        let snapshot: Vec<(Uuid, mpsc::Sender<String>)> = self
            .subscribers
            .read()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect();

        let mut delivered = 0;
        let mut failed = Vec::new();
        for (id, tx) in snapshot {
            match tx.try_send(text.clone()) {
                Ok(()) => delivered += 1,
                Err(TrySendError::Full(_)) => {
                    warn!(subscriber = %id, "realtime subscriber lagging, dropping it");
                    failed.push(id);
                }
                Err(TrySendError::Closed(_)) => failed.push(id),
            }
        }

        if !failed.is_empty() {
            let mut subscribers = self.subscribers.write();
            for id in &failed {
                subscribers.remove(id);
            }
        }

        debug!(
            event_type = event.kind(),
            delivered,
            dropped = failed.len(),
            "broadcast realtime event"
        );
        delivered
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}
