use shared::{CommitEditResponse, Sale, ISO_DATE_FORMAT};

use crate::backend::domain::models::SaleRecord;
use crate::backend::domain::CommitOutcome;

pub struct SaleMapper;

impl SaleMapper {
    pub fn to_dto(domain: SaleRecord) -> Sale {
        let status = domain.status();
        Sale {
            id: domain.id,
            date: domain.date.format(ISO_DATE_FORMAT).to_string(),
            product: domain.product,
            given_to: domain.given_to,
            sales_made: domain.sales_made,
            sales_not_made: domain.sales_not_made,
            target_expected: domain.target_expected,
            total_received: domain.total_received,
            status,
        }
    }

    pub fn to_commit_response(outcome: CommitOutcome) -> CommitEditResponse {
        CommitEditResponse {
            record_id: outcome.record_id,
            field: outcome.field,
            status: outcome.status,
            totals: outcome.totals,
        }
    }
}
