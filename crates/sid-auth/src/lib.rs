pub mod claims;
pub mod error;
pub mod login_rate_limiter;
pub mod rate_limit_config;
pub mod session_token_service;

pub use claims::Claims;
pub use error::{AuthError, Result};
pub use login_rate_limiter::LoginRateLimiter;
pub use rate_limit_config::RateLimitConfig;
pub use session_token_service::SessionTokenService;
