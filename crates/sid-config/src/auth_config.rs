use crate::{ConfigError, ConfigErrorResult, DEFAULT_TOKEN_TTL_SECS, MIN_SECRET_LENGTH};

use std::fmt;

use serde::Deserialize;

/// Session-token settings. The signing secret comes exclusively from the
/// `SID_AUTH_TOKEN_SECRET` environment variable - `#[serde(skip)]` keeps
/// it out of config.toml so it can never end up in a file on disk.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    #[serde(skip)]
    pub token_secret: Option<String>,
    pub token_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let secret = self.token_secret.as_deref().ok_or_else(|| {
            ConfigError::auth("auth.token_secret is required (set SID_AUTH_TOKEN_SECRET)")
        })?;

        if secret.len() < MIN_SECRET_LENGTH {
            return Err(ConfigError::auth(format!(
                "auth.token_secret must be at least {MIN_SECRET_LENGTH} characters"
            )));
        }

        if self.token_ttl_secs == 0 {
            return Err(ConfigError::auth("auth.token_ttl_secs must be positive"));
        }

        Ok(())
    }
}

// Hand-written so the secret never appears in debug output or logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field(
                "token_secret",
                &self.token_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish()
    }
}
