pub mod error;
pub mod field;
pub mod sale;

pub use error::SalesError;
pub use field::{parse_date, parse_number, FieldUpdate, NumericInputPolicy, SalePatch, DISPLAY_DATE_FORMAT};
pub use sale::{SaleDraft, SaleRecord};
