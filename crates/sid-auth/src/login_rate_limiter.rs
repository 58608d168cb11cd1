//! Per-account login throttle - the rate-limit hook point.
//!
//! Keyed by normalized email so one noisy account cannot lock everyone
//! out. Consulted before password verification; anything beyond this
//! (lockout policy, IP tracking) is out of scope.

use crate::{AuthError, RateLimitConfig, Result as AuthErrorResult};

use std::num::NonZeroU32;
use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::keyed::DefaultKeyedStateStore,
};

pub struct LoginRateLimiter {
    limiter: RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>,
    config: RateLimitConfig,
}

impl LoginRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let max_attempts = config.max_attempts.max(1);
        let window_secs = config.window_secs.max(1);

        let period = Duration::from_secs_f64(window_secs as f64 / max_attempts as f64);
        let burst = NonZeroU32::new(max_attempts).unwrap_or(NonZeroU32::new(1).unwrap());

        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(NonZeroU32::new(1).unwrap()))
            .allow_burst(burst);

        Self {
            limiter: RateLimiter::keyed(quota),
            config,
        }
    }

    /// Check whether another attempt for `key` is allowed
    #[track_caller]
    pub fn check(&self, key: &str) -> AuthErrorResult<()> {
        self.limiter
            .check_key(&key.to_string())
            .map_err(|_| AuthError::RateLimitExceeded {
                limit: self.config.max_attempts,
                window_secs: self.config.window_secs,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Drop state for keys whose quota has fully replenished.
    ///
    /// The keyed store gains an entry for every distinct key ever checked,
    /// including emails that match no account, so a housekeeping task must
    /// call this periodically or the map grows for the life of the process.
    pub fn prune(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.limiter.len()
    }
}

impl Default for LoginRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
