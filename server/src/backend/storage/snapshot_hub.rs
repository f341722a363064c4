use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;
use tracing::debug;

use super::traits::SnapshotReceiver;
use crate::backend::domain::models::SaleRecord;

/// Fan-out of collection snapshots to every live subscriber
///
/// Subscribers whose receiving end was dropped are pruned on the next publish.
#[derive(Default)]
pub struct SnapshotHub {
    subscribers: Mutex<HashMap<String, Vec<mpsc::UnboundedSender<Vec<SaleRecord>>>>>,
}

impl SnapshotHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber and hand it the current contents first
    pub fn subscribe(&self, collection: &str, current: Vec<SaleRecord>) -> SnapshotReceiver {
        let (sender, receiver) = mpsc::unbounded_channel();
        // The receiver is alive here, so this send cannot fail
        let _ = sender.send(current);
        let mut subscribers = self.lock();
        subscribers
            .entry(collection.to_string())
            .or_default()
            .push(sender);
        receiver
    }

    /// Push a snapshot to every subscriber of the collection
    pub fn publish(&self, collection: &str, snapshot: &[SaleRecord]) {
        let mut subscribers = self.lock();
        if let Some(senders) = subscribers.get_mut(collection) {
            senders.retain(|sender| sender.send(snapshot.to_vec()).is_ok());
            debug!(
                "Published {} records of '{}' to {} subscribers",
                snapshot.len(),
                collection,
                senders.len()
            );
        }
    }

    pub fn subscriber_count(&self, collection: &str) -> usize {
        self.lock().get(collection).map_or(0, Vec::len)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<mpsc::UnboundedSender<Vec<SaleRecord>>>>> {
        // A panic while holding the lock leaves the map itself intact
        self.subscribers.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
