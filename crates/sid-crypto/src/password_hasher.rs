//! One-way password hashing with Argon2id.
//!
//! `hash` produces a PHC-formatted record carrying the algorithm, its
//! parameters, a fresh random salt, and the digest; `verify` recomputes
//! from the stored parameters and compares in constant time. There is no
//! way back from the record to the password.

use crate::error::{CryptoError, Result as CryptoErrorResult};

use argon2::password_hash::{
    Error as PasswordHashError, PasswordHash, SaltString, rand_core::OsRng,
};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};

#[derive(Default)]
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Hash a password for storage.
    ///
    /// Each call generates a new salt, so hashing the same password twice
    /// yields different records; both verify.
    #[track_caller]
    pub fn hash(&self, password: &str) -> CryptoErrorResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CryptoError::malformed_hash(format!("failed to hash password: {e}")))
    }

    /// Verify a password against a stored record.
    ///
    /// A wrong password is `Ok(false)`, never an error. Only an
    /// unparseable stored record errors; that indicates store corruption
    /// or misuse and is treated as fatal upstream.
    #[track_caller]
    pub fn verify(&self, password: &str, stored: &str) -> CryptoErrorResult<bool> {
        let parsed = PasswordHash::new(stored)
            .map_err(|e| CryptoError::malformed_hash(format!("invalid hash record: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(PasswordHashError::Password) => Ok(false),
            Err(e) => Err(CryptoError::malformed_hash(format!(
                "hash verification failed: {e}"
            ))),
        }
    }
}
