use crate::api::error::ApiError;
use crate::identity::IdentityError;

use sid_auth::AuthError;
use sid_db::DbError;

use std::panic::Location;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_location::ErrorLocation;

fn here() -> ErrorLocation {
    ErrorLocation::from(Location::caller())
}

fn status_of(error: ApiError) -> StatusCode {
    error.into_response().status()
}

#[test]
fn given_validation_error_when_into_response_then_400() {
    let error = ApiError::from(IdentityError::Validation {
        message: "email cannot be empty".into(),
        field: Some("email".into()),
        location: here(),
    });

    assert!(matches!(error, ApiError::Validation { .. }));
    assert_eq!(status_of(error), StatusCode::BAD_REQUEST);
}

#[test]
fn given_duplicate_email_when_into_response_then_409() {
    let error = ApiError::from(IdentityError::DuplicateEmail { location: here() });

    assert_eq!(status_of(error), StatusCode::CONFLICT);
}

#[test]
fn given_invalid_credentials_when_into_response_then_401() {
    let error = ApiError::from(IdentityError::invalid_credentials());

    assert_eq!(status_of(error), StatusCode::UNAUTHORIZED);
}

#[test]
fn given_rate_limited_when_into_response_then_429() {
    let error = ApiError::from(IdentityError::RateLimited {
        limit: 10,
        window_secs: 60,
        location: here(),
    });

    assert_eq!(status_of(error), StatusCode::TOO_MANY_REQUESTS);
}

#[test]
fn given_not_found_when_into_response_then_404() {
    let error = ApiError::from(IdentityError::not_found());

    assert_eq!(status_of(error), StatusCode::NOT_FOUND);
}

#[test]
fn given_storage_failure_when_mapped_then_internal_500() {
    let error = ApiError::from(IdentityError::Storage {
        source: DbError::corrupt("bad row"),
    });

    assert!(matches!(error, ApiError::Internal { .. }));
    assert_eq!(status_of(error), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn given_expired_token_when_mapped_then_unauthenticated_401() {
    let error = ApiError::from(AuthError::TokenExpired { location: here() });

    assert!(matches!(error, ApiError::Unauthenticated { .. }));
    assert_eq!(status_of(error), StatusCode::UNAUTHORIZED);
}

#[test]
fn given_forged_token_when_mapped_then_unauthenticated_401() {
    let error = ApiError::from(AuthError::SignatureInvalid { location: here() });

    assert_eq!(status_of(error), StatusCode::UNAUTHORIZED);
}

#[test]
fn given_internal_error_when_into_response_then_detail_not_exposed() {
    let error = ApiError::internal("pool exhausted on shard 7");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // The response body carries a generic message; the detail stays in logs.
    // (Body content is asserted in the integration tests.)
}
