//! Sales view-model.
//!
//! Holds the in-memory mirror of the sales collection, the totals derived
//! from it and the single inline-edit cursor. The cache is replaced wholesale
//! by every snapshot; the only other mutation is the optimistic application
//! of a committed cell, which a later snapshot overwrites.

use shared::{EditCursor, SaleField, SaleStatus, SalesTotals};
use tracing::{debug, warn};

use super::models::{FieldUpdate, NumericInputPolicy, SalePatch, SaleRecord, SalesError};

#[derive(Debug, Default)]
pub struct SalesViewModel {
    records: Vec<SaleRecord>,
    totals: SalesTotals,
    cursor: Option<EditCursor>,
    generation: u64,
    numeric_policy: NumericInputPolicy,
}

/// A validated commit that was applied locally and still has to reach the store
#[derive(Debug, Clone, PartialEq)]
pub struct PendingCommit {
    pub record_id: String,
    pub patch: SalePatch,
    /// Status of the record after the update
    pub status: SaleStatus,
    /// Value the edited field held before the update
    previous: FieldUpdate,
    generation: u64,
}

impl SalesViewModel {
    pub fn new(numeric_policy: NumericInputPolicy) -> Self {
        Self {
            numeric_policy,
            ..Self::default()
        }
    }

    /// Replace the cache with a full snapshot, keeping the store's order
    pub fn apply_snapshot(&mut self, records: Vec<SaleRecord>) {
        self.records = records;
        self.generation += 1;
        self.recompute_totals();
        debug!(
            "Applied snapshot #{} with {} records",
            self.generation,
            self.records.len()
        );
    }

    /// Activate a cell, silently abandoning any edit in progress
    pub fn begin_edit(&mut self, record_id: impl Into<String>, field: SaleField) {
        let cursor = EditCursor {
            record_id: record_id.into(),
            field,
        };
        if let Some(previous) = self.cursor.replace(cursor) {
            debug!("Abandoned edit of {} on {}", previous.field, previous.record_id);
        }
    }

    /// Validate raw input for the active cell and apply it to the cache
    ///
    /// The cursor is cleared whatever the outcome. On error the cache and
    /// totals are left untouched.
    pub fn prepare_commit(&mut self, raw_value: &str) -> Result<PendingCommit, SalesError> {
        let cursor = self.cursor.take().ok_or(SalesError::NoActiveEdit)?;

        let index = self
            .position(&cursor.record_id)
            .ok_or_else(|| SalesError::NotFound(cursor.record_id.clone()))?;

        let update = FieldUpdate::parse(cursor.field, raw_value, self.numeric_policy)?;

        let record = &mut self.records[index];
        let previous = FieldUpdate::from_record(cursor.field, record);
        update.apply_to(record);

        // Status comes from the resulting pair, not the one before the edit
        let status = record.status();
        let patch = SalePatch {
            status: cursor.field.affects_status().then_some(status),
            update,
        };

        self.recompute_totals();

        Ok(PendingCommit {
            record_id: cursor.record_id,
            patch,
            status,
            previous,
            generation: self.generation,
        })
    }

    /// Undo an optimistic commit the store refused
    ///
    /// Only the edited field is restored, and only while it still holds the
    /// value this commit wrote: other fields may carry edits the store already
    /// accepted. Returns false when a newer snapshot already replaced the
    /// cache, in which case the store's data wins and nothing is restored.
    pub fn rollback(&mut self, pending: &PendingCommit) -> bool {
        if pending.generation != self.generation {
            return false;
        }
        let field = pending.patch.update.field();
        let Some(index) = self.position(&pending.record_id) else {
            warn!("Cannot roll back {}: record no longer cached", pending.record_id);
            return false;
        };

        let record = &mut self.records[index];
        if FieldUpdate::from_record(field, record) != pending.patch.update {
            debug!("Not rolling back {} of {}: overwritten since", field, pending.record_id);
            return false;
        }
        pending.previous.apply_to(record);
        self.recompute_totals();
        true
    }

    pub fn totals(&self) -> SalesTotals {
        self.totals
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }

    pub fn record(&self, record_id: &str) -> Option<&SaleRecord> {
        self.records.iter().find(|record| record.id == record_id)
    }

    pub fn status_of(&self, record_id: &str) -> Option<SaleStatus> {
        self.record(record_id).map(SaleRecord::status)
    }

    pub fn edit_cursor(&self) -> Option<&EditCursor> {
        self.cursor.as_ref()
    }

    pub fn is_editing(&self, record_id: &str, field: SaleField) -> bool {
        self.cursor
            .as_ref()
            .map_or(false, |cursor| cursor.record_id == record_id && cursor.field == field)
    }

    /// Number of snapshots applied so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn numeric_policy(&self) -> NumericInputPolicy {
        self.numeric_policy
    }

    fn position(&self, record_id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == record_id)
    }

    fn recompute_totals(&mut self) {
        self.totals = compute_totals(&self.records);
    }
}

/// Element-wise sums over a record set
pub fn compute_totals(records: &[SaleRecord]) -> SalesTotals {
    records.iter().fold(SalesTotals::default(), |mut totals, record| {
        totals.sales_made += record.sales_made;
        totals.sales_not_made += record.sales_not_made;
        totals.total_received += record.total_received;
        totals
    })
}
