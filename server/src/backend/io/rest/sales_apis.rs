//! # REST API for Sales
//!
//! Read endpoints for the cached collection plus the two inline-edit calls.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::backend::domain::models::SalesError;
use crate::backend::io::rest::mappers::sale_mapper::SaleMapper;
use crate::backend::AppState;
use shared::{
    BeginEditRequest, BeginEditResponse, CommitEditRequest, EditCursor, ErrorResponse,
    MonthlySummaryResponse, Sale,
};

/// Status code for each domain failure
pub fn sales_error_status(err: &SalesError) -> StatusCode {
    match err {
        SalesError::Parse { .. } | SalesError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        SalesError::NotFound(_) => StatusCode::NOT_FOUND,
        SalesError::NoActiveEdit => StatusCode::CONFLICT,
        SalesError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

pub fn sales_error_response(err: &SalesError) -> Response {
    (
        sales_error_status(err),
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

/// All cached sales in store order
pub async fn list_sales(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/sales");
    let sales: Vec<Sale> = state
        .sales_service
        .records()
        .await
        .into_iter()
        .map(SaleMapper::to_dto)
        .collect();
    (StatusCode::OK, Json(sales))
}

pub async fn get_sales_table(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/sales/table");
    let view_model = state.sales_service.view_model();
    let view_model = view_model.lock().await;
    let table = state.sales_table_service.render(&view_model);
    (StatusCode::OK, Json(table))
}

pub async fn get_sales_totals(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/sales/totals");
    (StatusCode::OK, Json(state.sales_service.totals().await))
}

pub async fn get_monthly_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/sales/summary/monthly");
    let records = state.sales_service.records().await;
    let months = state.summary_service.monthly_summary(&records);
    (StatusCode::OK, Json(MonthlySummaryResponse { months }))
}

/// Put a cell into edit mode and return the value to prefill the input with
pub async fn begin_sale_edit(
    State(state): State<AppState>,
    Json(request): Json<BeginEditRequest>,
) -> Response {
    info!("POST /api/sales/edit/begin - {} on {}", request.field, request.record_id);

    let view_model = state.sales_service.view_model();
    let mut view_model = view_model.lock().await;

    let Some(edit_value) = view_model
        .record(&request.record_id)
        .map(|record| record.input_value(request.field))
    else {
        warn!("Edit requested for unknown sale {}", request.record_id);
        return sales_error_response(&SalesError::NotFound(request.record_id));
    };

    state
        .sales_table_service
        .on_cell_click(&mut view_model, &request.record_id, request.field);

    let response = BeginEditResponse {
        editing: EditCursor {
            record_id: request.record_id,
            field: request.field,
        },
        edit_value,
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Commit the active cell with whatever the user typed
pub async fn commit_sale_edit(
    State(state): State<AppState>,
    Json(request): Json<CommitEditRequest>,
) -> Response {
    info!("POST /api/sales/edit/commit - raw value: {:?}", request.raw_value);

    match state
        .sales_table_service
        .on_cell_blur(&state.sales_service, &request.raw_value)
        .await
    {
        Ok(outcome) => (StatusCode::OK, Json(SaleMapper::to_commit_response(outcome))).into_response(),
        Err(e) => {
            error!("Commit failed: {}", e);
            sales_error_response(&e)
        }
    }
}
