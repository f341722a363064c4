//! # REST API for Staff Sign-In
//!
//! Sign-in state only decides what the page shows; the sales endpoints do
//! not check it.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{info, warn};

use crate::backend::storage::{AuthError, StaffIdentity};
use crate::backend::AppState;
use shared::{AuthStatusResponse, ErrorResponse, LoginRequest};

fn status_response(identity: Option<StaffIdentity>) -> AuthStatusResponse {
    match identity {
        Some(identity) => AuthStatusResponse {
            signed_in: true,
            email: Some(identity.email),
            display_name: identity.display_name,
        },
        None => AuthStatusResponse {
            signed_in: false,
            email: None,
            display_name: None,
        },
    }
}

pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> Response {
    info!("POST /api/auth/login - {}", request.email);

    match state.auth_gate.sign_in(&request.email, &request.password).await {
        Ok(identity) => (StatusCode::OK, Json(status_response(Some(identity)))).into_response(),
        Err(e) => {
            warn!("Sign-in failed: {}", e);
            let status = match e {
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            };
            (status, Json(ErrorResponse { error: e.to_string() })).into_response()
        }
    }
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    info!("POST /api/auth/logout");
    state.auth_gate.sign_out().await;
    (StatusCode::OK, Json(status_response(None)))
}

pub async fn auth_status(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(status_response(state.auth_gate.current().await)))
}
