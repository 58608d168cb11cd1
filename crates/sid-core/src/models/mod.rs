pub mod auth_response;
pub mod identity_record;
pub mod user_profile;
