//! Sales service: the view-model wired to a record store.
//!
//! All reads and writes of the cached collection go through here. A commit
//! validates and applies the edit locally under the view-model lock, releases
//! the lock while the store acknowledges, and rolls the local value back if
//! the store refuses.

use std::sync::Arc;

use anyhow::Result;
use shared::{EditCursor, SaleField, SaleStatus, SalesTotals};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::models::{NumericInputPolicy, SaleRecord, SalesError};
use super::snapshot_listener::spawn_snapshot_listener;
use super::view_model::SalesViewModel;
use crate::backend::storage::{RecordStore, StoreError};

/// Result of a commit the store accepted
#[derive(Debug, Clone, PartialEq)]
pub struct CommitOutcome {
    pub record_id: String,
    pub field: SaleField,
    pub status: SaleStatus,
    pub totals: SalesTotals,
}

#[derive(Clone)]
pub struct SalesService {
    view_model: Arc<Mutex<SalesViewModel>>,
    store: Arc<dyn RecordStore>,
    collection: String,
}

impl SalesService {
    pub fn new(store: Arc<dyn RecordStore>, collection: impl Into<String>, policy: NumericInputPolicy) -> Self {
        Self {
            view_model: Arc::new(Mutex::new(SalesViewModel::new(policy))),
            store,
            collection: collection.into(),
        }
    }

    pub fn view_model(&self) -> Arc<Mutex<SalesViewModel>> {
        self.view_model.clone()
    }

    pub fn store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Subscribe to the collection and keep the view-model in sync with it
    pub async fn start_sync(&self) -> Result<JoinHandle<usize>> {
        let receiver = self.store.subscribe(&self.collection).await?;
        info!("Listening for snapshots of '{}'", self.collection);
        Ok(spawn_snapshot_listener(receiver, self.view_model.clone()))
    }

    pub async fn apply_snapshot(&self, records: Vec<SaleRecord>) {
        self.view_model.lock().await.apply_snapshot(records);
    }

    pub async fn begin_edit(&self, record_id: &str, field: SaleField) {
        self.view_model.lock().await.begin_edit(record_id, field);
    }

    pub async fn edit_cursor(&self) -> Option<EditCursor> {
        self.view_model.lock().await.edit_cursor().cloned()
    }

    /// Commit the active cell and forward the update to the store
    pub async fn commit_edit(&self, raw_value: &str) -> Result<CommitOutcome, SalesError> {
        let pending = {
            let mut view_model = self.view_model.lock().await;
            match view_model.prepare_commit(raw_value) {
                Ok(pending) => pending,
                Err(e) => {
                    warn!("Edit rejected: {}", e);
                    return Err(e);
                }
            }
        };

        let field = pending.patch.update.field();
        match self
            .store
            .update_fields(&self.collection, &pending.record_id, &pending.patch)
            .await
        {
            Ok(()) => {
                info!("Committed {} of sale {}", field, pending.record_id);
                let totals = self.view_model.lock().await.totals();
                Ok(CommitOutcome {
                    record_id: pending.record_id,
                    field,
                    status: pending.status,
                    totals,
                })
            }
            Err(e) => {
                error!("Store refused {} of sale {}: {:#}", field, pending.record_id, e);
                if self.view_model.lock().await.rollback(&pending) {
                    info!("Rolled back local value of sale {}", pending.record_id);
                }
                match e.downcast_ref::<StoreError>() {
                    Some(StoreError::DocumentNotFound { .. }) => Err(SalesError::NotFound(pending.record_id)),
                    None => Err(SalesError::StoreUnavailable(e.to_string())),
                }
            }
        }
    }

    pub async fn totals(&self) -> SalesTotals {
        self.view_model.lock().await.totals()
    }

    pub async fn records(&self) -> Vec<SaleRecord> {
        self.view_model.lock().await.records().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::{SaleDraft, SalePatch};
    use crate::backend::storage::{MemoryRecordStore, SnapshotReceiver};
    use anyhow::bail;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use tokio::sync::Notify;

    fn record(id: &str, sales_made: f64, target_expected: f64) -> SaleRecord {
        SaleRecord {
            id: id.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            product: "Bread".to_string(),
            given_to: "Kemi".to_string(),
            sales_made,
            sales_not_made: 0.0,
            target_expected,
            total_received: 0.0,
        }
    }

    async fn service_with(records: Vec<SaleRecord>) -> (SalesService, Arc<MemoryRecordStore>) {
        let store = Arc::new(MemoryRecordStore::new().with_records("sales", records.clone()).await);
        let service = SalesService::new(store.clone(), "sales", NumericInputPolicy::Reject);
        service.apply_snapshot(records).await;
        (service, store)
    }

    #[tokio::test]
    async fn test_commit_reaches_store() {
        let (service, store) = service_with(vec![record("a", 5.0, 10.0)]).await;
        service.begin_edit("a", SaleField::TargetExpected).await;

        let outcome = service.commit_edit("4").await.unwrap();

        assert_eq!(outcome.status, SaleStatus::Achieved);
        assert_eq!(outcome.field, SaleField::TargetExpected);
        assert_eq!(store.records("sales").await[0].target_expected, 4.0);
        assert_eq!(store.stored_result("sales", "a").await, Some(SaleStatus::Achieved));
        assert!(service.edit_cursor().await.is_none());
    }

    #[tokio::test]
    async fn test_store_failure_rolls_back() {
        let (service, store) = service_with(vec![record("a", 5.0, 10.0)]).await;
        store.set_online(false);
        service.begin_edit("a", SaleField::SalesMade).await;

        let err = service.commit_edit("20").await.unwrap_err();

        assert!(matches!(err, SalesError::StoreUnavailable(_)));
        assert!(service.edit_cursor().await.is_none());
        assert_eq!(service.totals().await.sales_made, 5.0);
        assert_eq!(store.records("sales").await[0].sales_made, 5.0);
    }

    #[tokio::test]
    async fn test_commit_on_vanished_record_skips_store() {
        let (service, store) = service_with(vec![record("a", 5.0, 10.0)]).await;
        service.begin_edit("a", SaleField::Product).await;
        service.apply_snapshot(Vec::new()).await;

        let err = service.commit_edit("Cake").await.unwrap_err();

        assert_eq!(err, SalesError::NotFound("a".to_string()));
        assert_eq!(store.records("sales").await[0].product, "Bread");
        assert_eq!(service.totals().await, SalesTotals::default());
    }

    #[tokio::test]
    async fn test_document_missing_from_store_is_not_found() {
        let store = Arc::new(MemoryRecordStore::new());
        let service = SalesService::new(store.clone(), "sales", NumericInputPolicy::Reject);
        service.apply_snapshot(vec![record("a", 5.0, 10.0)]).await;
        service.begin_edit("a", SaleField::SalesMade).await;

        let err = service.commit_edit("20").await.unwrap_err();

        assert_eq!(err, SalesError::NotFound("a".to_string()));
        assert_eq!(service.totals().await.sales_made, 5.0);
    }

    /// Store whose sales-made updates hang until released, then fail
    struct GatedStore {
        inner: MemoryRecordStore,
        gate: Notify,
    }

    #[async_trait]
    impl RecordStore for GatedStore {
        async fn subscribe(&self, collection: &str) -> Result<SnapshotReceiver> {
            self.inner.subscribe(collection).await
        }

        async fn insert(&self, collection: &str, draft: &SaleDraft) -> Result<String> {
            self.inner.insert(collection, draft).await
        }

        async fn update_fields(&self, collection: &str, id: &str, patch: &SalePatch) -> Result<()> {
            if patch.update.field() == SaleField::SalesMade {
                self.gate.notified().await;
                bail!("network down");
            }
            self.inner.update_fields(collection, id, patch).await
        }
    }

    #[tokio::test]
    async fn test_failed_commit_keeps_later_acknowledged_edit() {
        let records = vec![record("a", 5.0, 10.0)];
        let store = Arc::new(GatedStore {
            inner: MemoryRecordStore::new().with_records("sales", records.clone()).await,
            gate: Notify::new(),
        });
        let service = SalesService::new(store.clone(), "sales", NumericInputPolicy::Reject);
        service.apply_snapshot(records).await;

        service.begin_edit("a", SaleField::SalesMade).await;
        let slow = {
            let service = service.clone();
            tokio::spawn(async move { service.commit_edit("50").await })
        };
        for _ in 0..50 {
            if service.totals().await.sales_made == 50.0 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(service.totals().await.sales_made, 50.0);

        service.begin_edit("a", SaleField::Product).await;
        service.commit_edit("Cake").await.unwrap();

        store.gate.notify_one();
        let err = slow.await.unwrap().unwrap_err();

        assert!(matches!(err, SalesError::StoreUnavailable(_)));
        let cached = service.records().await;
        assert_eq!(cached[0].product, "Cake");
        assert_eq!(cached[0].sales_made, 5.0);
        assert_eq!(store.inner.records("sales").await[0].product, "Cake");
    }

    #[tokio::test]
    async fn test_sync_round_trip() {
        let store = Arc::new(MemoryRecordStore::new().with_records("sales", vec![record("a", 3.0, 1.0)]).await);
        let service = SalesService::new(store.clone(), "sales", NumericInputPolicy::Reject);
        let listener = service.start_sync().await.unwrap();

        // Wait for the initial snapshot to land
        for _ in 0..50 {
            if service.view_model().lock().await.generation() > 0 {
                break;
            }
            tokio::task::yield_now().await;
        }
        assert_eq!(service.totals().await.sales_made, 3.0);

        service.begin_edit("a", SaleField::SalesMade).await;
        service.commit_edit("7").await.unwrap();
        assert_eq!(service.totals().await.sales_made, 7.0);

        listener.abort();
    }
}
