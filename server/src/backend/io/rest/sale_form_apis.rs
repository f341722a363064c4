//! # REST API for the Add-Sale Form
//!
//! The page owns the form state: it asks for a fresh form, sends each edit
//! back through `/sales/form/input` to get the updated form, and finally
//! posts the whole form to create the sale.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, info, warn};

use crate::backend::domain::SaleSubmitError;
use crate::backend::{today, AppState};
use shared::{AddSaleResponse, ErrorResponse, SaleForm, SaleFormErrorResponse, SaleFormInputRequest};

pub async fn get_sale_form(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/sales/form");
    (StatusCode::OK, Json(state.sale_form_service.create_form(today())))
}

pub async fn apply_sale_form_input(
    State(state): State<AppState>,
    Json(request): Json<SaleFormInputRequest>,
) -> impl IntoResponse {
    info!("POST /api/sales/form/input - field: {}", request.field);
    let form = state
        .sale_form_service
        .with_input(request.form, request.field, &request.raw_value);
    (StatusCode::OK, Json(form))
}

/// Validate the form and insert a new sale
pub async fn create_sale(State(state): State<AppState>, Json(form): Json<SaleForm>) -> Response {
    info!("POST /api/sales - product: {:?}", form.product);

    let store = state.sales_service.store();
    match state
        .sale_form_service
        .submit(&form, store.as_ref(), state.sales_service.collection(), today())
        .await
    {
        Ok(submitted) => {
            let response = AddSaleResponse {
                sale_id: submitted.sale_id,
                success_message: state.sale_form_service.success_message(&form.product),
                form: submitted.form,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(SaleSubmitError::Invalid(errors)) => {
            warn!("Rejected sale form with {} error(s)", errors.len());
            let response = SaleFormErrorResponse {
                errors: state.sale_form_service.error_messages(&errors),
            };
            (StatusCode::BAD_REQUEST, Json(response)).into_response()
        }
        Err(e @ SaleSubmitError::StoreUnavailable(_)) => {
            error!("Failed to create sale: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse { error: e.to_string() }),
            )
                .into_response()
        }
    }
}
