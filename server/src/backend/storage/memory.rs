//! In-process record store.
//!
//! Keeps every collection in memory and pushes snapshots through the shared
//! `SnapshotHub`. Used for local runs without a data directory and in tests,
//! where `set_online(false)` simulates an unreachable store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{bail, Result};
use async_trait::async_trait;
use shared::SaleStatus;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use super::snapshot_hub::SnapshotHub;
use super::traits::{RecordStore, SnapshotReceiver, StoreError};
use crate::backend::domain::models::{SaleDraft, SalePatch, SaleRecord};

/// A stored document: the record plus its denormalised result column
#[derive(Debug, Clone)]
struct StoredSale {
    record: SaleRecord,
    result: Option<SaleStatus>,
}

pub struct MemoryRecordStore {
    collections: Mutex<HashMap<String, Vec<StoredSale>>>,
    hub: SnapshotHub,
    online: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self {
            collections: Mutex::new(HashMap::new()),
            hub: SnapshotHub::new(),
            online: AtomicBool::new(true),
        }
    }

    /// Seed a collection with existing records (no snapshot is pushed)
    pub async fn with_records(self, collection: &str, records: Vec<SaleRecord>) -> Self {
        {
            let mut collections = self.collections.lock().await;
            collections.insert(
                collection.to_string(),
                records
                    .into_iter()
                    .map(|record| StoredSale {
                        result: Some(record.status()),
                        record,
                    })
                    .collect(),
            );
        }
        self
    }

    /// While offline every call fails as a network error would
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Stored result column of a record, if any
    pub async fn stored_result(&self, collection: &str, id: &str) -> Option<SaleStatus> {
        let collections = self.collections.lock().await;
        collections
            .get(collection)?
            .iter()
            .find(|stored| stored.record.id == id)?
            .result
    }

    pub async fn records(&self, collection: &str) -> Vec<SaleRecord> {
        let collections = self.collections.lock().await;
        Self::snapshot_of(&collections, collection)
    }

    fn ensure_online(&self) -> Result<()> {
        if !self.online.load(Ordering::SeqCst) {
            bail!("record store is offline");
        }
        Ok(())
    }

    fn snapshot_of(collections: &HashMap<String, Vec<StoredSale>>, collection: &str) -> Vec<SaleRecord> {
        collections
            .get(collection)
            .map(|stored| stored.iter().map(|s| s.record.clone()).collect())
            .unwrap_or_default()
    }
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn subscribe(&self, collection: &str) -> Result<SnapshotReceiver> {
        self.ensure_online()?;
        let collections = self.collections.lock().await;
        let current = Self::snapshot_of(&collections, collection);
        let receiver = self.hub.subscribe(collection, current);
        info!(
            "Subscribed to '{}' ({} live subscribers)",
            collection,
            self.hub.subscriber_count(collection)
        );
        Ok(receiver)
    }

    async fn insert(&self, collection: &str, draft: &SaleDraft) -> Result<String> {
        self.ensure_online()?;
        let id = Uuid::new_v4().to_string();
        let mut collections = self.collections.lock().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(StoredSale {
                result: Some(draft.status()),
                record: SaleRecord::from_draft(id.clone(), draft.clone()),
            });
        info!("Inserted sale {} into '{}'", id, collection);

        let snapshot = Self::snapshot_of(&collections, collection);
        self.hub.publish(collection, &snapshot);
        Ok(id)
    }

    async fn update_fields(&self, collection: &str, id: &str, patch: &SalePatch) -> Result<()> {
        self.ensure_online()?;
        let mut collections = self.collections.lock().await;
        let stored = collections
            .get_mut(collection)
            .and_then(|sales| sales.iter_mut().find(|stored| stored.record.id == id))
            .ok_or_else(|| StoreError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        patch.update.apply_to(&mut stored.record);
        if let Some(status) = patch.status {
            stored.result = Some(status);
        }
        info!("Updated {} of sale {} in '{}'", patch.update.field(), id, collection);

        let snapshot = Self::snapshot_of(&collections, collection);
        self.hub.publish(collection, &snapshot);
        Ok(())
    }
}
