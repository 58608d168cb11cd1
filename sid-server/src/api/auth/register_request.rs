use std::fmt;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct RegisterRequest {
    /// Email address (required, unique after normalization)
    pub email: String,

    /// Password (required; only the hash is ever stored)
    pub password: String,

    /// Display name (required)
    pub full_name: String,

    /// National ID number (required, >= 12 digits after normalization)
    pub id_number: String,
}

// Hand-written so request logging can never capture the credentials.
impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("id_number", &"<redacted>")
            .finish()
    }
}
