//! Symmetric key derivation from a master secret.
//!
//! PBKDF2-HMAC-SHA256 with a configurable iteration count. The derived key
//! is held in a zeroizing wrapper so it is wiped from memory on drop.

use crate::error::{CryptoError, Result as CryptoErrorResult};

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a derived AES-256 key in bytes
pub const KEY_SIZE: usize = 32;

/// Default PBKDF2 iteration count; config may raise it, never lower
pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// A 256-bit symmetric key, zeroed on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub struct KeyDerivation;

impl KeyDerivation {
    /// Stretch `master_secret` into a 256-bit key.
    ///
    /// Deterministic for identical inputs. The iteration count is the
    /// brute-force work factor; callers pass the configured value.
    #[track_caller]
    pub fn derive(
        master_secret: &[u8],
        salt: &[u8],
        iterations: u32,
    ) -> CryptoErrorResult<DerivedKey> {
        if master_secret.is_empty() {
            return Err(CryptoError::key_derivation("master secret cannot be empty"));
        }
        if salt.is_empty() {
            return Err(CryptoError::key_derivation("salt cannot be empty"));
        }
        if iterations == 0 {
            return Err(CryptoError::key_derivation(
                "iteration count must be positive",
            ));
        }

        let mut bytes = [0u8; KEY_SIZE];
        pbkdf2_hmac::<Sha256>(master_secret, salt, iterations, &mut bytes);

        Ok(DerivedKey { bytes })
    }
}
