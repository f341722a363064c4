use chrono::NaiveDate;
use shared::{SaleField, SaleStatus, ISO_DATE_FORMAT};

/// A sale entry that has been persisted by the record store
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    pub id: String,
    pub date: NaiveDate,
    pub product: String,
    pub given_to: String,
    pub sales_made: f64,
    pub sales_not_made: f64,
    pub target_expected: f64,
    pub total_received: f64,
}

/// A sale entry that has not been persisted yet, so it has no id
#[derive(Debug, Clone, PartialEq)]
pub struct SaleDraft {
    pub date: NaiveDate,
    pub product: String,
    pub given_to: String,
    pub sales_made: f64,
    pub sales_not_made: f64,
    pub target_expected: f64,
    pub total_received: f64,
}

impl SaleRecord {
    pub fn from_draft(id: impl Into<String>, draft: SaleDraft) -> Self {
        Self {
            id: id.into(),
            date: draft.date,
            product: draft.product,
            given_to: draft.given_to,
            sales_made: draft.sales_made,
            sales_not_made: draft.sales_not_made,
            target_expected: draft.target_expected,
            total_received: draft.total_received,
        }
    }

    /// Always derived from the current amounts, never read back from storage
    pub fn status(&self) -> SaleStatus {
        SaleStatus::from_amounts(self.sales_made, self.target_expected)
    }

    /// Value of a field as the user would type it into an edit box
    pub fn input_value(&self, field: SaleField) -> String {
        match field {
            SaleField::Date => self.date.format(ISO_DATE_FORMAT).to_string(),
            SaleField::Product => self.product.clone(),
            SaleField::GivenTo => self.given_to.clone(),
            SaleField::SalesMade => self.sales_made.to_string(),
            SaleField::SalesNotMade => self.sales_not_made.to_string(),
            SaleField::TargetExpected => self.target_expected.to_string(),
            SaleField::TotalReceived => self.total_received.to_string(),
        }
    }
}

impl SaleDraft {
    pub fn status(&self) -> SaleStatus {
        SaleStatus::from_amounts(self.sales_made, self.target_expected)
    }
}
