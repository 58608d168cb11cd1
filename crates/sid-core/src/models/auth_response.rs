use crate::UserProfile;

use serde::{Deserialize, Serialize};

/// What a successful register or login returns: the decrypted profile plus
/// a signed session token the client presents on subsequent calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    pub token: String,
}
