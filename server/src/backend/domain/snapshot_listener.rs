//! Applies record store snapshots to the view-model.
//!
//! The listener is the single consumer of a collection's snapshot channel.
//! Snapshots are applied one at a time in arrival order; none are skipped or
//! merged.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::view_model::SalesViewModel;
use crate::backend::storage::SnapshotReceiver;

/// Spawn the listener task. It ends when the store drops the channel and
/// reports how many snapshots it applied.
pub fn spawn_snapshot_listener(
    mut receiver: SnapshotReceiver,
    view_model: Arc<Mutex<SalesViewModel>>,
) -> JoinHandle<usize> {
    tokio::spawn(async move {
        let mut applied = 0usize;
        while let Some(snapshot) = receiver.recv().await {
            debug!("Snapshot received with {} records", snapshot.len());
            view_model.lock().await.apply_snapshot(snapshot);
            applied += 1;
        }
        info!("Snapshot stream closed after {} snapshots", applied);
        applied
    })
}
