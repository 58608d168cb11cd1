pub mod error;
pub mod models;
pub mod validation;

pub use error::{CoreError, Result};
pub use models::auth_response::AuthResponse;
pub use models::identity_record::IdentityRecord;
pub use models::user_profile::UserProfile;
pub use validation::{normalize_email, normalize_id_number, require_non_empty};

pub use error_location::ErrorLocation;
