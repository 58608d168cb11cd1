use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Key derivation failed: {message} {location}")]
    KeyDerivation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Encryption failed: {message} {location}")]
    Encryption {
        message: String,
        location: ErrorLocation,
    },

    /// Authentication tag did not verify, or the bundle is not a valid
    /// nonce + ciphertext + tag envelope. Deliberately carries no detail
    /// about which byte failed.
    #[error("Ciphertext integrity check failed {location}")]
    Integrity { location: ErrorLocation },

    #[error("Malformed password hash record: {message} {location}")]
    MalformedHash {
        message: String,
        location: ErrorLocation,
    },
}

impl CryptoError {
    #[track_caller]
    pub fn key_derivation<S: Into<String>>(message: S) -> Self {
        CryptoError::KeyDerivation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn encryption<S: Into<String>>(message: S) -> Self {
        CryptoError::Encryption {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn integrity() -> Self {
        CryptoError::Integrity {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn malformed_hash<S: Into<String>>(message: S) -> Self {
        CryptoError::MalformedHash {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CryptoError>;
