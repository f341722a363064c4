use shared::SaleField;

/// Failures surfaced by the sales view-model and its services
///
/// None of these are fatal: the cache keeps its last good state and the
/// caller decides how to show the failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SalesError {
    #[error("Could not parse '{input}' as {field}")]
    Parse { field: SaleField, input: String },
    #[error("'{input}' is not a valid number for {field}")]
    InvalidInput { field: SaleField, input: String },
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),
    #[error("Sale record '{0}' not found")]
    NotFound(String),
    #[error("No cell is being edited")]
    NoActiveEdit,
}
