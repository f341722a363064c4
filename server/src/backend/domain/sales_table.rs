//! Sales table projection.
//!
//! Turns the view-model into the grid the browser draws: one row per cached
//! record in store order, one cell per editable column, a derived status
//! column and a totals footer. Rendering is a pure read; clicks and blurs are
//! the only inputs that change anything, and they go through the view-model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{
    SaleField, SaleStatus, SalesTableCell, SalesTableRow, SalesTableView, TableColumn, ISO_DATE_FORMAT,
};

use super::models::{SaleRecord, SalesError, DISPLAY_DATE_FORMAT};
use super::sales_service::{CommitOutcome, SalesService};
use super::view_model::SalesViewModel;

pub const STATUS_COLUMN_LABEL: &str = "Status";

/// Display options for the sales table
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SalesTableConfig {
    pub date_format: DateFormat,
}

/// Date formatting options
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    #[default]
    DayMonthYear, // "15/02/2026"
    MonthDayYear, // "02/15/2026"
    Iso,          // "2026-02-15"
}

#[derive(Clone, Default)]
pub struct SalesTableService {
    config: SalesTableConfig,
}

impl SalesTableService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SalesTableConfig) -> Self {
        Self { config }
    }

    pub fn columns(&self) -> Vec<TableColumn> {
        SaleField::ALL
            .iter()
            .map(|field| TableColumn {
                field: Some(*field),
                kind: Some(field.kind()),
                label: field.label().to_string(),
            })
            .chain(std::iter::once(TableColumn {
                field: None,
                kind: None,
                label: STATUS_COLUMN_LABEL.to_string(),
            }))
            .collect()
    }

    /// Project the whole view-model to a table
    pub fn render(&self, view_model: &SalesViewModel) -> SalesTableView {
        SalesTableView {
            columns: self.columns(),
            rows: view_model
                .records()
                .iter()
                .map(|record| self.render_row(view_model, record))
                .collect(),
            totals: view_model.totals(),
            editing: view_model.edit_cursor().cloned(),
        }
    }

    fn render_row(&self, view_model: &SalesViewModel, record: &SaleRecord) -> SalesTableRow {
        let cells = SaleField::ALL
            .iter()
            .map(|field| {
                let editing = view_model.is_editing(&record.id, *field);
                SalesTableCell {
                    field: *field,
                    display: self.display_value(record, *field),
                    editing,
                    edit_value: editing.then(|| record.input_value(*field)),
                }
            })
            .collect();

        let status = record.status();
        SalesTableRow {
            id: record.id.clone(),
            cells,
            status,
            status_class: self.status_class(status).to_string(),
        }
    }

    pub fn display_value(&self, record: &SaleRecord, field: SaleField) -> String {
        match field {
            SaleField::Date => self.format_date(record.date),
            SaleField::Product => record.product.clone(),
            SaleField::GivenTo => record.given_to.clone(),
            SaleField::SalesMade => self.format_number(record.sales_made),
            SaleField::SalesNotMade => self.format_number(record.sales_not_made),
            SaleField::TargetExpected => self.format_number(record.target_expected),
            SaleField::TotalReceived => self.format_number(record.total_received),
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        let format = match self.config.date_format {
            DateFormat::DayMonthYear => DISPLAY_DATE_FORMAT,
            DateFormat::MonthDayYear => "%m/%d/%Y",
            DateFormat::Iso => ISO_DATE_FORMAT,
        };
        date.format(format).to_string()
    }

    /// Shortest decimal form: 5 rather than 5.0, 3600.5 as is
    pub fn format_number(&self, value: f64) -> String {
        value.to_string()
    }

    /// CSS class hint for the status cell
    pub fn status_class(&self, status: SaleStatus) -> &'static str {
        if status.is_achieved() {
            "ok"
        } else {
            "no"
        }
    }

    /// Put a cell into edit mode unless it already is
    ///
    /// Returns true when a new edit was started.
    pub fn on_cell_click(&self, view_model: &mut SalesViewModel, record_id: &str, field: SaleField) -> bool {
        if view_model.is_editing(record_id, field) {
            return false;
        }
        view_model.begin_edit(record_id, field);
        true
    }

    /// Leaving the active cell commits whatever was typed
    pub async fn on_cell_blur(&self, sales: &SalesService, raw_value: &str) -> Result<CommitOutcome, SalesError> {
        sales.commit_edit(raw_value).await
    }
}
