pub mod at_rest_cipher;
pub mod error;
pub mod key_derivation;
pub mod password_hasher;

pub use at_rest_cipher::AtRestCipher;
pub use error::{CryptoError, Result};
pub use key_derivation::{DerivedKey, KeyDerivation};
pub use password_hasher::PasswordHasher;
