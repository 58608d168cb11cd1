pub mod api;
pub mod error;
pub mod health;
pub mod identity;
pub mod logger;
pub mod routes;
pub mod state;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{login, register},
        login_request::LoginRequest,
        register_request::RegisterRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::authenticated_user::AuthenticatedUser,
    profile::profile::me,
};

pub use crate::error::ServerError;
pub use crate::identity::{IdentityError, IdentityService, Registration};
pub use crate::routes::build_router;
pub use crate::state::AppState;
