//! Identity record - the persisted form of a registered user.

use std::fmt;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The at-rest representation of a user. The password hash is a one-way
/// Argon2id PHC record and the national ID number is an opaque ciphertext
/// bundle; neither ever leaves the store/service layer, so there are no
/// serde derives here.
#[derive(Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub full_name: String,
    /// Opaque nonce + ciphertext + tag bundle, base64-encoded
    pub encrypted_id_number: String,
    pub created_at: DateTime<Utc>,
}

impl IdentityRecord {
    /// Create a new record with a server-generated id and creation timestamp
    pub fn new(
        email: String,
        password_hash: String,
        full_name: String,
        encrypted_id_number: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            full_name,
            encrypted_id_number,
            created_at: Utc::now(),
        }
    }
}

// Hand-written so the credential material never ends up in logs.
impl fmt::Debug for IdentityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdentityRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("full_name", &self.full_name)
            .field("encrypted_id_number", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}
