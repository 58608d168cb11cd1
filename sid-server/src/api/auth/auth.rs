//! Authentication REST API handlers
//!
//! Registration and login both delegate to the identity service and
//! return the profile plus a signed session token.

use crate::api::auth::{login_request::LoginRequest, register_request::RegisterRequest};
use crate::api::error::Result as ApiResult;
use crate::identity::Registration;
use crate::state::AppState;

use sid_core::AuthResponse;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

/// POST /api/v1/auth/register
///
/// Create a new account and return `{user, token}`
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let response = state
        .identity
        .register(Registration {
            email: request.email,
            password: request.password,
            full_name: request.full_name,
            id_number: request.id_number,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/auth/login
///
/// Verify credentials and return `{user, token}`
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let response = state
        .identity
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(response))
}
