//! # Domain Module
//!
//! Business logic of the sales tracker, independent of HTTP and of where the
//! records are stored.
//!
//! ## Module Organization
//!
//! - **models**: sale records, typed field updates and the domain error
//! - **view_model**: cached records, derived totals and the inline-edit cursor
//! - **sales_service**: the view-model wired to a record store, including the
//!   optimistic commit path
//! - **snapshot_listener**: background task applying store snapshots in order
//! - **sales_table**: projection of the view-model to a renderable grid
//! - **sale_form**: add-sale form updates, validation and submission
//! - **summary_service**: sales made per calendar month
//! - **auth_gate**: signed-in staff session
//!
//! ## Business Rules
//!
//! - A sale is Achieved when sales made reach the expected target; the status
//!   is always derived from the current amounts
//! - Totals always equal the sums over the cached records
//! - At most one cell is being edited; starting another edit drops the first
//! - A form with a blank product or recipient never reaches the store

pub mod auth_gate;
pub mod models;
pub mod sale_form;
pub mod sales_service;
pub mod sales_table;
pub mod snapshot_listener;
pub mod summary_service;
pub mod view_model;

pub use auth_gate::AuthGate;
pub use sale_form::{FormValidationError, SaleFormService, SaleSubmitError, SubmittedSale};
pub use sales_service::{CommitOutcome, SalesService};
pub use sales_table::{DateFormat, SalesTableConfig, SalesTableService};
pub use snapshot_listener::spawn_snapshot_listener;
pub use summary_service::MonthlySummaryService;
pub use view_model::{compute_totals, PendingCommit, SalesViewModel};
