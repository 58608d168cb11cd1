use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Token and rate-limit failures. Externally these all collapse to
/// "unauthenticated" (or 429 for the rate limiter); the distinctions
/// exist for internal logging.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Token signature did not verify {location}")]
    SignatureInvalid { location: ErrorLocation },

    #[error("Malformed token: {message} {location}")]
    Malformed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Token issuance failed: {message} {location}")]
    Issuance {
        message: String,
        location: ErrorLocation,
    },

    #[error("Rate limit exceeded: {limit} attempts per {window_secs}s {location}")]
    RateLimitExceeded {
        limit: u32,
        window_secs: u64,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Machine-readable code for client responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::SignatureInvalid { .. } => "SIGNATURE_INVALID",
            Self::Malformed { .. } => "MALFORMED_TOKEN",
            Self::InvalidClaim { .. } => "INVALID_CLAIM",
            Self::Issuance { .. } => "TOKEN_ISSUANCE_FAILED",
            Self::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
