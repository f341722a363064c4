use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Writer};
use shared::{SaleStatus, ISO_DATE_FORMAT};
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use super::connection::{CsvConnection, SALES_HEADER};
use crate::backend::domain::models::{SaleDraft, SalePatch, SaleRecord};
use crate::backend::storage::snapshot_hub::SnapshotHub;
use crate::backend::storage::traits::{RecordStore, SnapshotReceiver, StoreError};

/// One row of a collection file
#[derive(Debug, Clone)]
struct SaleRow {
    record: SaleRecord,
    result: Option<SaleStatus>,
}

/// CSV-backed record store
pub struct CsvRecordStore {
    connection: CsvConnection,
    hub: SnapshotHub,
    // Serialises read-modify-write cycles on the collection files
    write_lock: Mutex<()>,
}

impl CsvRecordStore {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            connection,
            hub: SnapshotHub::new(),
            write_lock: Mutex::new(()),
        }
    }

    /// Stored result column of a record, if any
    pub fn stored_result(&self, collection: &str, id: &str) -> Result<Option<SaleStatus>> {
        Ok(self
            .read_rows(collection)?
            .into_iter()
            .find(|row| row.record.id == id)
            .and_then(|row| row.result))
    }

    /// Read every row of a collection file, in file order
    fn read_rows(&self, collection: &str) -> Result<Vec<SaleRow>> {
        let file_path = self.connection.ensure_collection_file_exists(collection)?;
        let file = File::open(&file_path)?;
        let mut csv_reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut rows = Vec::new();
        for (index, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = Self::parse_row(&record)
                .with_context(|| format!("{} line {}", file_path.display(), index + 2))?;
            rows.push(row);
        }
        Ok(rows)
    }

    /// Write every row of a collection file through a temp file
    fn write_rows(&self, collection: &str, rows: &[SaleRow]) -> Result<()> {
        let file_path = self.connection.collection_file_path(collection)?;
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record(SALES_HEADER)?;
            for row in rows {
                let sale = &row.record;
                let fields: [String; 9] = [
                    sale.id.clone(),
                    sale.date.format(ISO_DATE_FORMAT).to_string(),
                    sale.product.clone(),
                    sale.given_to.clone(),
                    sale.sales_made.to_string(),
                    sale.sales_not_made.to_string(),
                    sale.target_expected.to_string(),
                    sale.total_received.to_string(),
                    row.result.map(|status| status.label().to_string()).unwrap_or_default(),
                ];
                csv_writer.write_record(&fields)?;
            }
            csv_writer.flush()?;
        }

        fs::rename(&temp_path, &file_path)?;
        Ok(())
    }

    fn parse_row(record: &StringRecord) -> Result<SaleRow> {
        let column = |index: usize| {
            record
                .get(index)
                .ok_or_else(|| anyhow!("missing column '{}'", SALES_HEADER[index]))
        };
        let number = |index: usize| -> Result<f64> {
            let raw = column(index)?;
            raw.trim()
                .parse::<f64>()
                .with_context(|| format!("column '{}' is not a number: '{}'", SALES_HEADER[index], raw))
        };

        let date_raw = column(1)?;
        let date = NaiveDate::parse_from_str(date_raw.trim(), ISO_DATE_FORMAT)
            .with_context(|| format!("column 'date' is not a date: '{}'", date_raw))?;

        Ok(SaleRow {
            record: SaleRecord {
                id: column(0)?.to_string(),
                date,
                product: column(2)?.to_string(),
                given_to: column(3)?.to_string(),
                sales_made: number(4)?,
                sales_not_made: number(5)?,
                target_expected: number(6)?,
                total_received: number(7)?,
            },
            // Older files have no result column
            result: record.get(8).and_then(SaleStatus::from_label),
        })
    }

    fn snapshot(rows: &[SaleRow]) -> Vec<SaleRecord> {
        rows.iter().map(|row| row.record.clone()).collect()
    }
}

#[async_trait]
impl RecordStore for CsvRecordStore {
    async fn subscribe(&self, collection: &str) -> Result<SnapshotReceiver> {
        let _guard = self.write_lock.lock().await;
        let rows = self.read_rows(collection)?;
        let receiver = self.hub.subscribe(collection, Self::snapshot(&rows));
        info!(
            "Subscribed to '{}' ({} records, {} live subscribers)",
            collection,
            rows.len(),
            self.hub.subscriber_count(collection)
        );
        Ok(receiver)
    }

    async fn insert(&self, collection: &str, draft: &SaleDraft) -> Result<String> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.read_rows(collection)?;

        let id = Uuid::new_v4().to_string();
        rows.push(SaleRow {
            result: Some(draft.status()),
            record: SaleRecord::from_draft(id.clone(), draft.clone()),
        });
        self.write_rows(collection, &rows)?;
        info!("Stored sale {} in {}.csv", id, collection);

        self.hub.publish(collection, &Self::snapshot(&rows));
        Ok(id)
    }

    async fn update_fields(&self, collection: &str, id: &str, patch: &SalePatch) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut rows = self.read_rows(collection)?;

        let Some(row) = rows.iter_mut().find(|row| row.record.id == id) else {
            warn!("Update for unknown sale {} in {}.csv", id, collection);
            return Err(StoreError::DocumentNotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            }
            .into());
        };
        patch.update.apply_to(&mut row.record);
        if let Some(status) = patch.status {
            row.result = Some(status);
        }

        self.write_rows(collection, &rows)?;
        info!("Updated {} of sale {} in {}.csv", patch.update.field(), id, collection);

        self.hub.publish(collection, &Self::snapshot(&rows));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::TestEnvironment;
    use super::*;
    use crate::backend::domain::models::FieldUpdate;

    fn draft(product: &str) -> SaleDraft {
        SaleDraft {
            date: NaiveDate::from_ymd_opt(2026, 2, 15).unwrap(),
            product: product.to_string(),
            given_to: "Ngozi, Ltd.".to_string(),
            sales_made: 5.0,
            sales_not_made: 1.5,
            target_expected: 10.0,
            total_received: 120.25,
        }
    }

    #[tokio::test]
    async fn test_insert_and_reopen() {
        let env = TestEnvironment::new().unwrap();
        let id = env.store().insert("sales", &draft("Soap")).await.unwrap();

        // A new store over the same directory sees the persisted row
        let reopened = env.store();
        let mut receiver = reopened.subscribe("sales").await.unwrap();
        let snapshot = receiver.recv().await.unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, id);
        assert_eq!(snapshot[0].given_to, "Ngozi, Ltd.");
        assert_eq!(snapshot[0].sales_not_made, 1.5);
        assert_eq!(snapshot[0].total_received, 120.25);
        assert_eq!(snapshot[0].date, NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());
    }

    #[tokio::test]
    async fn test_update_pushes_snapshot_and_result() {
        let env = TestEnvironment::new().unwrap();
        let store = env.store();
        let id = store.insert("sales", &draft("Soap")).await.unwrap();
        let mut receiver = store.subscribe("sales").await.unwrap();
        receiver.recv().await.unwrap();

        let patch = SalePatch {
            update: FieldUpdate::TargetExpected(4.0),
            status: Some(SaleStatus::Achieved),
        };
        store.update_fields("sales", &id, &patch).await.unwrap();

        let snapshot = receiver.recv().await.unwrap();
        assert_eq!(snapshot[0].target_expected, 4.0);
        assert_eq!(store.stored_result("sales", &id).unwrap(), Some(SaleStatus::Achieved));
    }

    #[tokio::test]
    async fn test_date_survives_file_round_trip() {
        let env = TestEnvironment::new().unwrap();
        let store = env.store();
        let id = store.insert("sales", &draft("Soap")).await.unwrap();
        let patch = SalePatch {
            update: FieldUpdate::Date(NaiveDate::from_ymd_opt(2026, 2, 15).unwrap()),
            status: None,
        };
        store.update_fields("sales", &id, &patch).await.unwrap();

        let content = fs::read_to_string(env.base_path.join("sales.csv")).unwrap();
        assert!(content.contains(",2026-02-15,"));
        let rows = store.read_rows("sales").unwrap();
        assert_eq!(rows[0].record.date, NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());
    }

    #[tokio::test]
    async fn test_update_unknown_id_fails() {
        let env = TestEnvironment::new().unwrap();
        let store = env.store();
        let patch = SalePatch {
            update: FieldUpdate::Product("x".to_string()),
            status: None,
        };
        let error = store.update_fields("sales", "missing", &patch).await.unwrap_err();
        assert!(matches!(
            error.downcast_ref::<StoreError>(),
            Some(StoreError::DocumentNotFound { id, .. }) if id == "missing"
        ));
    }

    #[tokio::test]
    async fn test_corrupt_row_is_reported() {
        let env = TestEnvironment::new().unwrap();
        fs::write(
            env.base_path.join("sales.csv"),
            "id,date,product,given_to,sales_made,sales_not_made,target_expected,total_received,result\n\
             a,2026-02-15,Soap,Ada,lots,0,1,1,Achieved\n",
        )
        .unwrap();

        let err = env.store().subscribe("sales").await.unwrap_err();
        assert!(format!("{:#}", err).contains("sales_made"));
    }

    #[tokio::test]
    async fn test_rows_without_result_column_load() {
        let env = TestEnvironment::new().unwrap();
        fs::write(
            env.base_path.join("sales.csv"),
            "id,date,product,given_to,sales_made,sales_not_made,target_expected,total_received\n\
             a,2026-02-15,Soap,Ada,3,0,1,1\n",
        )
        .unwrap();

        let rows = env.store().read_rows("sales").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].result, None);
        assert_eq!(rows[0].record.sales_made, 3.0);
    }
}
