//! Identity service errors.
//!
//! The variants are the full internal story; the API layer collapses them
//! to the client-facing codes. `InvalidCredentials` deliberately carries
//! nothing that would distinguish an unknown email from a wrong password.

use sid_auth::AuthError;
use sid_core::CoreError;
use sid_crypto::CryptoError;
use sid_db::DbError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Email already registered {location}")]
    DuplicateEmail { location: ErrorLocation },

    /// Unknown email or wrong password - intentionally the same variant
    #[error("Invalid credentials {location}")]
    InvalidCredentials { location: ErrorLocation },

    #[error("User not found {location}")]
    NotFound { location: ErrorLocation },

    #[error("Rate limit exceeded: {limit} attempts per {window_secs}s {location}")]
    RateLimited {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },

    #[error("Storage failure: {source}")]
    Storage {
        #[source]
        source: DbError,
    },

    #[error("Crypto failure: {source}")]
    Crypto {
        #[source]
        source: CryptoError,
    },

    #[error("Token failure: {source}")]
    Token {
        #[source]
        source: AuthError,
    },

    /// Background task failure (a blocking worker panicked or was cancelled)
    #[error("Internal failure: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IdentityError {
    #[track_caller]
    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found() -> Self {
        Self::NotFound {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<CoreError> for IdentityError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation { message, field, .. } => IdentityError::Validation {
                message,
                field,
                location: ErrorLocation::from(Location::caller()),
            },
            CoreError::Uuid { source, .. } => IdentityError::Validation {
                message: format!("invalid identifier: {source}"),
                field: None,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<DbError> for IdentityError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        match e {
            DbError::DuplicateEmail { .. } => IdentityError::DuplicateEmail {
                location: ErrorLocation::from(Location::caller()),
            },
            other => IdentityError::Storage { source: other },
        }
    }
}

impl From<CryptoError> for IdentityError {
    fn from(e: CryptoError) -> Self {
        IdentityError::Crypto { source: e }
    }
}

impl From<AuthError> for IdentityError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::RateLimitExceeded {
                limit, window_secs, ..
            } => IdentityError::RateLimited {
                limit,
                window_secs,
                location: ErrorLocation::from(Location::caller()),
            },
            other => IdentityError::Token { source: other },
        }
    }
}

pub type Result<T> = std::result::Result<T, IdentityError>;
