//! Typed single-field updates.
//!
//! Each table column has its own variant, and each variant owns the parsing
//! rule for its raw input. An update for a column that does not exist cannot
//! be constructed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{SaleField, SaleStatus, ISO_DATE_FORMAT};

use super::error::SalesError;
use super::sale::SaleRecord;

/// Display format accepted as a fallback when parsing dates
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// What to do with numeric input that does not parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericInputPolicy {
    /// Blank or unparsable input becomes 0, matching browser number inputs
    CoerceToZero,
    /// Blank or unparsable input fails with `SalesError::InvalidInput`
    #[default]
    Reject,
}

/// A new value for exactly one column of a sale
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Date(NaiveDate),
    Product(String),
    GivenTo(String),
    SalesMade(f64),
    SalesNotMade(f64),
    TargetExpected(f64),
    TotalReceived(f64),
}

/// The payload forwarded to the record store for one committed cell
///
/// `status` is present only when the update changes the derived status; the
/// store keeps it as a denormalised column and nothing reads it back.
#[derive(Debug, Clone, PartialEq)]
pub struct SalePatch {
    pub update: FieldUpdate,
    pub status: Option<SaleStatus>,
}

impl FieldUpdate {
    /// Parse raw cell input for the given column
    pub fn parse(field: SaleField, raw: &str, policy: NumericInputPolicy) -> Result<Self, SalesError> {
        let number = |raw: &str| parse_number(field, raw, policy);
        match field {
            SaleField::Date => parse_date(raw)
                .map(FieldUpdate::Date)
                .ok_or_else(|| SalesError::Parse {
                    field,
                    input: raw.to_string(),
                }),
            SaleField::Product => Ok(FieldUpdate::Product(raw.to_string())),
            SaleField::GivenTo => Ok(FieldUpdate::GivenTo(raw.to_string())),
            SaleField::SalesMade => number(raw).map(FieldUpdate::SalesMade),
            SaleField::SalesNotMade => number(raw).map(FieldUpdate::SalesNotMade),
            SaleField::TargetExpected => number(raw).map(FieldUpdate::TargetExpected),
            SaleField::TotalReceived => number(raw).map(FieldUpdate::TotalReceived),
        }
    }

    /// Current value of one field of a record
    pub fn from_record(field: SaleField, record: &SaleRecord) -> Self {
        match field {
            SaleField::Date => FieldUpdate::Date(record.date),
            SaleField::Product => FieldUpdate::Product(record.product.clone()),
            SaleField::GivenTo => FieldUpdate::GivenTo(record.given_to.clone()),
            SaleField::SalesMade => FieldUpdate::SalesMade(record.sales_made),
            SaleField::SalesNotMade => FieldUpdate::SalesNotMade(record.sales_not_made),
            SaleField::TargetExpected => FieldUpdate::TargetExpected(record.target_expected),
            SaleField::TotalReceived => FieldUpdate::TotalReceived(record.total_received),
        }
    }

    pub fn field(&self) -> SaleField {
        match self {
            FieldUpdate::Date(_) => SaleField::Date,
            FieldUpdate::Product(_) => SaleField::Product,
            FieldUpdate::GivenTo(_) => SaleField::GivenTo,
            FieldUpdate::SalesMade(_) => SaleField::SalesMade,
            FieldUpdate::SalesNotMade(_) => SaleField::SalesNotMade,
            FieldUpdate::TargetExpected(_) => SaleField::TargetExpected,
            FieldUpdate::TotalReceived(_) => SaleField::TotalReceived,
        }
    }

    pub fn apply_to(&self, record: &mut SaleRecord) {
        match self {
            FieldUpdate::Date(date) => record.date = *date,
            FieldUpdate::Product(value) => record.product = value.clone(),
            FieldUpdate::GivenTo(value) => record.given_to = value.clone(),
            FieldUpdate::SalesMade(value) => record.sales_made = *value,
            FieldUpdate::SalesNotMade(value) => record.sales_not_made = *value,
            FieldUpdate::TargetExpected(value) => record.target_expected = *value,
            FieldUpdate::TotalReceived(value) => record.total_received = *value,
        }
    }
}

/// Parse a calendar date from ISO (YYYY-MM-DD) or display (DD/MM/YYYY) input
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, DISPLAY_DATE_FORMAT))
        .ok()
}

/// Parse numeric input under the given policy
pub fn parse_number(field: SaleField, raw: &str, policy: NumericInputPolicy) -> Result<f64, SalesError> {
    let trimmed = raw.trim();
    let parsed = if trimmed.is_empty() {
        None
    } else {
        trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
    };

    match (parsed, policy) {
        (Some(value), _) => Ok(value),
        (None, NumericInputPolicy::CoerceToZero) => Ok(0.0),
        (None, NumericInputPolicy::Reject) => Err(SalesError::InvalidInput {
            field,
            input: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_verbatim() {
        let update = FieldUpdate::parse(SaleField::GivenTo, "  Mr. Okafor ", NumericInputPolicy::Reject).unwrap();
        assert_eq!(update, FieldUpdate::GivenTo("  Mr. Okafor ".to_string()));
        assert_eq!(update.field(), SaleField::GivenTo);
    }

    #[test]
    fn test_every_field_updates_its_own_column() {
        let record = SaleRecord {
            id: "a".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            product: "Tea".to_string(),
            given_to: "Ben".to_string(),
            sales_made: 1.0,
            sales_not_made: 2.0,
            target_expected: 3.0,
            total_received: 4.0,
        };
        for field in SaleField::ALL {
            let raw = if field == SaleField::Date { "2026-03-09" } else { "9" };
            let update = FieldUpdate::parse(field, raw, NumericInputPolicy::Reject).unwrap();
            assert_eq!(update.field(), field);

            let mut edited = record.clone();
            update.apply_to(&mut edited);
            assert_eq!(FieldUpdate::from_record(field, &edited), update);
            let changed: Vec<SaleField> = SaleField::ALL
                .into_iter()
                .filter(|other| edited.input_value(*other) != record.input_value(*other))
                .collect();
            assert_eq!(changed, vec![field]);
        }
    }

    #[test]
    fn test_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2026, 2, 15).unwrap();
        assert_eq!(parse_date("2026-02-15"), Some(expected));
        assert_eq!(parse_date(" 15/02/2026 "), Some(expected));
        assert_eq!(parse_date("2026-02-30"), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn test_bad_date_is_parse_error() {
        let err = FieldUpdate::parse(SaleField::Date, "31/31/2026", NumericInputPolicy::CoerceToZero).unwrap_err();
        assert_eq!(
            err,
            SalesError::Parse {
                field: SaleField::Date,
                input: "31/31/2026".to_string()
            }
        );
    }

    #[test]
    fn test_numbers_parse() {
        assert_eq!(parse_number(SaleField::SalesMade, " 12.5 ", NumericInputPolicy::Reject), Ok(12.5));
        assert_eq!(parse_number(SaleField::SalesMade, "-3", NumericInputPolicy::Reject), Ok(-3.0));
        assert_eq!(parse_number(SaleField::SalesMade, "1e3", NumericInputPolicy::Reject), Ok(1000.0));
    }

    #[test]
    fn test_coerce_policy_zeroes_garbage() {
        let policy = NumericInputPolicy::CoerceToZero;
        assert_eq!(parse_number(SaleField::TotalReceived, "abc", policy), Ok(0.0));
        assert_eq!(parse_number(SaleField::TotalReceived, "", policy), Ok(0.0));
        assert_eq!(parse_number(SaleField::TotalReceived, "inf", policy), Ok(0.0));
    }

    #[test]
    fn test_reject_policy_fails_garbage() {
        let policy = NumericInputPolicy::Reject;
        for input in ["abc", "", "NaN", "12kg"] {
            let err = parse_number(SaleField::TargetExpected, input, policy).unwrap_err();
            assert!(matches!(err, SalesError::InvalidInput { field: SaleField::TargetExpected, .. }));
        }
    }

    #[test]
    fn test_apply_to_record() {
        let mut record = SaleRecord {
            id: "a".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            product: "Tea".to_string(),
            given_to: "Ben".to_string(),
            sales_made: 1.0,
            sales_not_made: 0.0,
            target_expected: 2.0,
            total_received: 3.0,
        };
        let update = FieldUpdate::parse(SaleField::Date, "2026-02-15", NumericInputPolicy::Reject).unwrap();
        update.apply_to(&mut record);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2026, 2, 15).unwrap());

        let update = FieldUpdate::parse(SaleField::SalesNotMade, "4", NumericInputPolicy::Reject).unwrap();
        update.apply_to(&mut record);
        assert_eq!(record.sales_not_made, 4.0);
    }
}
