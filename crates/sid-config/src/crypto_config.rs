use crate::{ConfigError, ConfigErrorResult, DEFAULT_KDF_ITERATIONS, MIN_KDF_ITERATIONS, MIN_SECRET_LENGTH};

use std::fmt;

use serde::Deserialize;

/// At-rest encryption settings. As with the token secret, the master
/// secret is environment-only (`SID_CRYPTO_MASTER_SECRET`).
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    #[serde(skip)]
    pub master_secret: Option<String>,
    /// PBKDF2 work factor for deriving the at-rest key
    pub kdf_iterations: u32,
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            master_secret: None,
            kdf_iterations: DEFAULT_KDF_ITERATIONS,
        }
    }
}

impl CryptoConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let secret = self.master_secret.as_deref().ok_or_else(|| {
            ConfigError::crypto("crypto.master_secret is required (set SID_CRYPTO_MASTER_SECRET)")
        })?;

        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::crypto(format!(
                "crypto.master_secret must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }

        if self.kdf_iterations < MIN_KDF_ITERATIONS {
            return Err(ConfigError::crypto(format!(
                "crypto.kdf_iterations must be at least {MIN_KDF_ITERATIONS}, got {}",
                self.kdf_iterations
            )));
        }

        Ok(())
    }
}

// Hand-written so the secret never appears in debug output or logs.
impl fmt::Debug for CryptoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CryptoConfig")
            .field(
                "master_secret",
                &self.master_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("kdf_iterations", &self.kdf_iterations)
            .finish()
    }
}
