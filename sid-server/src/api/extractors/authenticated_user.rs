//! Axum extractor for token-authenticated requests

use crate::api::error::ApiError;
use crate::state::AppState;

use sid_auth::Claims;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Verified claims of the caller's session token.
///
/// Rejects with 401 when the `Authorization: Bearer` header is missing,
/// unparseable, or the token fails signature/expiry verification.
pub struct AuthenticatedUser(pub Claims);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .ok_or_else(|| ApiError::unauthenticated("missing Authorization header"))?;

            let value = header
                .to_str()
                .map_err(|_| ApiError::unauthenticated("invalid Authorization header"))?;

            let token = value
                .strip_prefix("Bearer ")
                .ok_or_else(|| ApiError::unauthenticated("expected a Bearer token"))?;

            let claims = state.tokens.verify(token)?;

            Ok(AuthenticatedUser(claims))
        }
    }
}
