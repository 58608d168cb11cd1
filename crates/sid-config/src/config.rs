use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, CryptoConfig, DatabaseConfig, LoggingConfig,
    RateLimitConfig, ServerConfig,
};

use std::path::PathBuf;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub crypto: CryptoConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for SID_CONFIG_DIR env var, else use ./.sid/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply SID_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: SID_CONFIG_DIR env var > ./.sid/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("SID_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".sid"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.auth.validate()?;
        self.crypto.validate()?;
        self.rate_limit.validate()?;

        // The token secret and the at-rest master secret must never be the
        // same value: a leaked token would otherwise expose the data key.
        if let (Some(token), Some(master)) = (
            self.auth.token_secret.as_deref(),
            self.crypto.master_secret.as_deref(),
        ) && token == master
        {
            return Err(ConfigError::config(
                "auth.token_secret and crypto.master_secret must be distinct values",
            ));
        }

        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (pool size {})",
            self.server.host, self.server.port, self.server.max_db_connections
        );
        info!("  database: {}", self.database.path);
        info!(
            "  auth: token_secret={}, ttl={}s",
            if self.auth.token_secret.is_some() {
                "set"
            } else {
                "missing"
            },
            self.auth.token_ttl_secs
        );
        info!(
            "  crypto: master_secret={}, kdf_iterations={}",
            if self.crypto.master_secret.is_some() {
                "set"
            } else {
                "missing"
            },
            self.crypto.kdf_iterations
        );
        info!(
            "  rate_limit: {}/{}s",
            self.rate_limit.max_attempts, self.rate_limit.window_secs
        );
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("SID_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("SID_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "SID_SERVER_MAX_DB_CONNECTIONS",
            &mut self.server.max_db_connections,
        );

        // Database
        Self::apply_env_string("SID_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_option_string("SID_AUTH_TOKEN_SECRET", &mut self.auth.token_secret);
        Self::apply_env_parse("SID_AUTH_TOKEN_TTL_SECS", &mut self.auth.token_ttl_secs);

        // Crypto
        Self::apply_env_option_string("SID_CRYPTO_MASTER_SECRET", &mut self.crypto.master_secret);
        Self::apply_env_parse("SID_CRYPTO_KDF_ITERATIONS", &mut self.crypto.kdf_iterations);

        // Rate limit
        Self::apply_env_parse(
            "SID_RATE_LIMIT_MAX_ATTEMPTS",
            &mut self.rate_limit.max_attempts,
        );
        Self::apply_env_parse(
            "SID_RATE_LIMIT_WINDOW_SECS",
            &mut self.rate_limit.window_secs,
        );

        // Logging
        Self::apply_env_parse("SID_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("SID_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("SID_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
