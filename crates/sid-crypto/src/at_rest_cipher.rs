//! Authenticated at-rest encryption for a single sensitive field.
//!
//! AES-256-GCM under a key derived from the master secret and a fixed salt
//! context. A fresh random nonce is generated inside `encrypt` on every
//! call; there is no code path that accepts a caller-supplied nonce, so
//! nonce reuse under the key is structurally impossible. The bundle layout
//! is `nonce || ciphertext || tag`, base64-encoded into one opaque string.

use crate::error::{CryptoError, Result as CryptoErrorResult};
use crate::key_derivation::{DerivedKey, KeyDerivation};

use aes_gcm::{
    Aes256Gcm, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};

/// AES-GCM nonce size (96 bits)
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag size
pub const TAG_SIZE: usize = 16;

/// Salt context binding the derived key to this use. Versioned so a future
/// scheme change can re-derive under a new context without ambiguity.
pub const AT_REST_SALT_CONTEXT: &str = "secureid:at-rest:v1";

pub struct AtRestCipher {
    cipher: Aes256Gcm,
}

impl AtRestCipher {
    /// Build a cipher from the externally supplied master secret.
    ///
    /// The encryption key is derived via [`KeyDerivation`] with the fixed
    /// [`AT_REST_SALT_CONTEXT`]; the derived key is consumed here and
    /// zeroed when it goes out of scope.
    #[track_caller]
    pub fn new(master_secret: &str, kdf_iterations: u32) -> CryptoErrorResult<Self> {
        let key: DerivedKey = KeyDerivation::derive(
            master_secret.as_bytes(),
            AT_REST_SALT_CONTEXT.as_bytes(),
            kdf_iterations,
        )?;

        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CryptoError::key_derivation(format!("invalid key length: {e}")))?;

        Ok(Self { cipher })
    }

    /// Encrypt a plaintext field into an opaque bundle.
    ///
    /// Two calls with the same plaintext produce different bundles.
    #[track_caller]
    pub fn encrypt(&self, plaintext: &str) -> CryptoErrorResult<String> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::encryption("AES-GCM encryption failed"))?;

        let mut bundle = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        bundle.extend_from_slice(nonce.as_slice());
        bundle.extend_from_slice(&ciphertext);

        Ok(BASE64.encode(bundle))
    }

    /// Decrypt a bundle produced by [`encrypt`](Self::encrypt).
    ///
    /// Any tampering, truncation, or wrong-key decryption fails with
    /// [`CryptoError::Integrity`]; partially decrypted data is never
    /// returned.
    #[track_caller]
    pub fn decrypt(&self, bundle: &str) -> CryptoErrorResult<String> {
        let combined = BASE64
            .decode(bundle)
            .map_err(|_| CryptoError::integrity())?;

        if combined.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CryptoError::integrity());
        }

        let (nonce, ciphertext) = combined.split_at(NONCE_SIZE);

        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::integrity())?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::integrity())
    }
}
