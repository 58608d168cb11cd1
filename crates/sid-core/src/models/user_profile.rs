//! User profile - the transient, caller-facing view of an identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Decrypted, in-memory projection of an [`IdentityRecord`]. Exists only
/// for the duration of a request/response and is never persisted.
///
/// [`IdentityRecord`]: crate::IdentityRecord
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    /// National ID number, decrypted on demand
    pub id_number: String,
    pub created_at: DateTime<Utc>,
}
