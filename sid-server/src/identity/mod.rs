pub mod error;
pub mod service;

pub use error::{IdentityError, Result};
pub use service::{IdentityService, Registration};
