//! Profile REST API handler

use crate::api::error::{ApiError, Result as ApiResult};
use crate::api::extractors::authenticated_user::AuthenticatedUser;
use crate::state::AppState;

use sid_core::UserProfile;

use axum::{Json, extract::State};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserProfile,
}

/// GET /api/v1/me
///
/// Return the profile of the token's subject
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> ApiResult<Json<ProfileResponse>> {
    // The subject was written by our own issuer; a non-UUID value means a
    // token from a different system signed with the same secret.
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| ApiError::unauthenticated("token subject is not a valid id"))?;

    let user = state.identity.fetch_profile(user_id).await?;

    Ok(Json(ProfileResponse { user }))
}
