//! Add-sale form logic.
//!
//! The form is a plain value (`shared::SaleForm`). Every update takes the
//! current form and returns the next one, so the browser page can hold the
//! state and the server never keeps a form between requests. Validation turns
//! a form into a `SaleDraft`; only a draft ever reaches the record store.

use chrono::NaiveDate;
use shared::{SaleField, SaleForm};
use tracing::{error, info};

use super::models::{parse_date, parse_number, NumericInputPolicy, SaleDraft};
use crate::backend::storage::RecordStore;

/// Reasons a form cannot be turned into a sale
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormValidationError {
    #[error("Please enter {}", .0.label())]
    MissingText(SaleField),
    #[error("{} must be a number", .0.label())]
    InvalidNumber(SaleField),
    #[error("'{0}' is not a valid date")]
    InvalidDate(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SaleSubmitError {
    #[error("The form has {} problem(s)", .0.len())]
    Invalid(Vec<FormValidationError>),
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),
}

/// A sale the store accepted, plus the form to show next
#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedSale {
    pub sale_id: String,
    pub form: SaleForm,
}

#[derive(Clone, Default)]
pub struct SaleFormService;

impl SaleFormService {
    pub fn new() -> Self {
        Self
    }

    /// Fresh form with the given day preselected
    pub fn create_form(&self, today: NaiveDate) -> SaleForm {
        SaleForm::for_date(today)
    }

    /// Return the form with one field replaced by raw input
    ///
    /// Amounts behave like a browser number input: blank or unparsable input
    /// becomes 0. The date is kept as typed and checked in `validate`.
    pub fn with_input(&self, mut form: SaleForm, field: SaleField, raw: &str) -> SaleForm {
        let number = || parse_number(field, raw, NumericInputPolicy::CoerceToZero).unwrap_or(0.0);
        match field {
            SaleField::Date => form.date = raw.to_string(),
            SaleField::Product => form.product = raw.to_string(),
            SaleField::GivenTo => form.given_to = raw.to_string(),
            SaleField::SalesMade => form.sales_made = number(),
            SaleField::SalesNotMade => form.sales_not_made = number(),
            SaleField::TargetExpected => form.target_expected = number(),
            SaleField::TotalReceived => form.total_received = number(),
        }
        form
    }

    /// Check every field and build a draft, or list everything that is wrong
    pub fn validate(&self, form: &SaleForm) -> Result<SaleDraft, Vec<FormValidationError>> {
        let mut errors = Vec::new();

        let product = form.product.trim();
        if product.is_empty() {
            errors.push(FormValidationError::MissingText(SaleField::Product));
        }
        let given_to = form.given_to.trim();
        if given_to.is_empty() {
            errors.push(FormValidationError::MissingText(SaleField::GivenTo));
        }

        let amounts = [
            (SaleField::SalesMade, form.sales_made),
            (SaleField::SalesNotMade, form.sales_not_made),
            (SaleField::TargetExpected, form.target_expected),
            (SaleField::TotalReceived, form.total_received),
        ];
        for (field, value) in amounts {
            if !value.is_finite() {
                errors.push(FormValidationError::InvalidNumber(field));
            }
        }

        let date = parse_date(&form.date);
        if date.is_none() {
            errors.push(FormValidationError::InvalidDate(form.date.clone()));
        }

        match date {
            Some(date) if errors.is_empty() => Ok(SaleDraft {
                date,
                product: product.to_string(),
                given_to: given_to.to_string(),
                sales_made: form.sales_made,
                sales_not_made: form.sales_not_made,
                target_expected: form.target_expected,
                total_received: form.total_received,
            }),
            _ => Err(errors),
        }
    }

    /// Validate and insert the sale, returning its id and a cleared form
    pub async fn submit(
        &self,
        form: &SaleForm,
        store: &dyn RecordStore,
        collection: &str,
        today: NaiveDate,
    ) -> Result<SubmittedSale, SaleSubmitError> {
        let draft = self.validate(form).map_err(SaleSubmitError::Invalid)?;

        let sale_id = store.insert(collection, &draft).await.map_err(|e| {
            error!("Failed to insert sale for '{}': {:#}", draft.product, e);
            SaleSubmitError::StoreUnavailable(e.to_string())
        })?;

        info!("Recorded sale {} ({}, {})", sale_id, draft.product, draft.status());
        Ok(SubmittedSale {
            sale_id,
            form: self.create_form(today),
        })
    }

    pub fn success_message(&self, product: &str) -> String {
        format!("Sale of {} recorded", product.trim())
    }

    pub fn error_messages(&self, errors: &[FormValidationError]) -> Vec<String> {
        errors.iter().map(ToString::to_string).collect()
    }
}
