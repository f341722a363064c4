use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire format for calendar dates (no time-of-day, no timezone)
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A persisted sale entry as sent to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    /// Identifier assigned by the record store
    pub id: String,
    /// Calendar date in ISO format (YYYY-MM-DD)
    pub date: String,
    pub product: String,
    pub given_to: String,
    pub sales_made: f64,
    pub sales_not_made: f64,
    pub target_expected: f64,
    pub total_received: f64,
    /// Derived from sales_made and target_expected at the time of sending
    pub status: SaleStatus,
}

/// Whether a sale reached its target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaleStatus {
    #[serde(rename = "Achieved")]
    Achieved,
    #[serde(rename = "Not Achieved")]
    NotAchieved,
}

impl SaleStatus {
    /// A sale is achieved once sales made reach the expected target
    pub fn from_amounts(sales_made: f64, target_expected: f64) -> Self {
        if sales_made >= target_expected {
            SaleStatus::Achieved
        } else {
            SaleStatus::NotAchieved
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SaleStatus::Achieved => "Achieved",
            SaleStatus::NotAchieved => "Not Achieved",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Achieved" => Some(SaleStatus::Achieved),
            "Not Achieved" => Some(SaleStatus::NotAchieved),
            _ => None,
        }
    }

    pub fn is_achieved(&self) -> bool {
        matches!(self, SaleStatus::Achieved)
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a field's raw input is interpreted; the page picks its input widget from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Date,
    Numeric,
}

/// Every editable column of the sales table
///
/// The set is closed: an unknown field name fails deserialization and never
/// reaches the domain layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SaleField {
    Date,
    Product,
    GivenTo,
    SalesMade,
    SalesNotMade,
    TargetExpected,
    TotalReceived,
}

impl SaleField {
    /// Column order used by the table
    pub const ALL: [SaleField; 7] = [
        SaleField::Date,
        SaleField::Product,
        SaleField::GivenTo,
        SaleField::SalesMade,
        SaleField::SalesNotMade,
        SaleField::TargetExpected,
        SaleField::TotalReceived,
    ];

    pub fn kind(&self) -> FieldKind {
        match self {
            SaleField::Date => FieldKind::Date,
            SaleField::Product | SaleField::GivenTo => FieldKind::Text,
            SaleField::SalesMade
            | SaleField::SalesNotMade
            | SaleField::TargetExpected
            | SaleField::TotalReceived => FieldKind::Numeric,
        }
    }

    /// Name used on the wire and in stored documents
    pub fn name(&self) -> &'static str {
        match self {
            SaleField::Date => "date",
            SaleField::Product => "product",
            SaleField::GivenTo => "givenTo",
            SaleField::SalesMade => "salesMade",
            SaleField::SalesNotMade => "salesNotMade",
            SaleField::TargetExpected => "targetExpected",
            SaleField::TotalReceived => "totalReceived",
        }
    }

    /// Column header shown in the table
    pub fn label(&self) -> &'static str {
        match self {
            SaleField::Date => "Date",
            SaleField::Product => "Product",
            SaleField::GivenTo => "Given To",
            SaleField::SalesMade => "Sales Made",
            SaleField::SalesNotMade => "Sales Not Made",
            SaleField::TargetExpected => "Target",
            SaleField::TotalReceived => "Received",
        }
    }

    /// Editing one of these fields changes the derived status
    pub fn affects_status(&self) -> bool {
        matches!(self, SaleField::SalesMade | SaleField::TargetExpected)
    }
}

impl fmt::Display for SaleField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Aggregate sums over the current record set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    pub sales_made: f64,
    pub sales_not_made: f64,
    pub total_received: f64,
}

/// The single cell currently in inline-edit mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCursor {
    pub record_id: String,
    pub field: SaleField,
}

/// Add-sale form state, passed in and out of the form service by value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleForm {
    pub product: String,
    pub given_to: String,
    pub sales_made: f64,
    pub sales_not_made: f64,
    pub target_expected: f64,
    pub total_received: f64,
    /// Raw date input (YYYY-MM-DD)
    pub date: String,
}

impl SaleForm {
    /// Empty form with every amount at zero and the given date preselected
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            product: String::new(),
            given_to: String::new(),
            sales_made: 0.0,
            sales_not_made: 0.0,
            target_expected: 0.0,
            total_received: 0.0,
            date: date.format(ISO_DATE_FORMAT).to_string(),
        }
    }
}

impl Default for SaleForm {
    fn default() -> Self {
        Self::for_date(chrono::Local::now().date_naive())
    }
}

/// Column header of the rendered table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    /// `field` and `kind` are None for the derived status column
    pub field: Option<SaleField>,
    pub kind: Option<FieldKind>,
    pub label: String,
}

/// One rendered cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTableCell {
    pub field: SaleField,
    pub display: String,
    pub editing: bool,
    /// Initial input value, only present while editing
    pub edit_value: Option<String>,
}

/// One rendered row (one sale)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTableRow {
    pub id: String,
    pub cells: Vec<SalesTableCell>,
    pub status: SaleStatus,
    /// CSS class hint for the status cell ("ok" / "no")
    pub status_class: String,
}

/// Full grid projection of the sales view-model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesTableView {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<SalesTableRow>,
    pub totals: SalesTotals,
    pub editing: Option<EditCursor>,
}

/// Sales made in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummaryEntry {
    /// YYYY-MM
    pub month: String,
    /// e.g. "February 2026"
    pub label: String,
    pub sales_made: f64,
    pub sale_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummaryResponse {
    pub months: Vec<MonthlySummaryEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginEditRequest {
    pub record_id: String,
    pub field: SaleField,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeginEditResponse {
    pub editing: EditCursor,
    pub edit_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitEditRequest {
    pub raw_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitEditResponse {
    pub record_id: String,
    pub field: SaleField,
    pub status: SaleStatus,
    pub totals: SalesTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleFormInputRequest {
    pub form: SaleForm,
    pub field: SaleField,
    pub raw_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSaleResponse {
    pub sale_id: String,
    pub success_message: String,
    /// Form reset to defaults, ready for the next entry
    pub form: SaleForm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleFormErrorResponse {
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub signed_in: bool,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Generic error body returned by the REST layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
