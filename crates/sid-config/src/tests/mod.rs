
use std::env;

use tempfile::TempDir;

pub(crate) const TEST_TOKEN_SECRET: &str = "test-token-secret-0123456789abcdefghij";
pub(crate) const TEST_MASTER_SECRET: &str = "test-master-secret-0123456789abcdefghi";

/// RAII guard for environment variables - automatically restores on drop
pub(crate) struct EnvGuard {
    key: &'static str,
    original: Option<String>,
}

impl EnvGuard {
    pub(crate) fn set(key: &'static str, value: &str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::set_var(key, value);
            Self { key, original }
        }
    }

    #[allow(dead_code)]
    pub(crate) fn remove(key: &'static str) -> Self {
        unsafe {
            let original = env::var(key).ok();
            env::remove_var(key);
            Self { key, original }
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            match &self.original {
                Some(val) => env::set_var(self.key, val),
                None => env::remove_var(self.key),
            }
        }
    }
}

/// Create a temp config directory and point SID_CONFIG_DIR at it
pub(crate) fn setup_config_dir() -> (TempDir, EnvGuard) {
    let temp = TempDir::new().unwrap();
    let guard = EnvGuard::set("SID_CONFIG_DIR", temp.path().to_str().unwrap());
    (temp, guard)
}

/// Guards that supply both required secrets via the environment
pub(crate) fn setup_secrets() -> (EnvGuard, EnvGuard) {
    (
        EnvGuard::set("SID_AUTH_TOKEN_SECRET", TEST_TOKEN_SECRET),
        EnvGuard::set("SID_CRYPTO_MASTER_SECRET", TEST_MASTER_SECRET),
    )
}
