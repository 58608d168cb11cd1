use crate::identity::IdentityService;

use sid_auth::SessionTokenService;

use std::sync::Arc;

use sqlx::SqlitePool;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub identity: Arc<IdentityService>,
    pub tokens: Arc<SessionTokenService>,
}
