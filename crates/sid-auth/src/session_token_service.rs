//! Stateless session tokens: HS256 JWTs issued at login/registration and
//! verified on every subsequent request. No server-side session table and
//! no silent refresh; an expired token means explicit re-login.

use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
};

pub struct SessionTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl SessionTokenService {
    /// Create a service signing with HS256 (symmetric secret).
    ///
    /// The secret must be distinct from the at-rest encryption secret;
    /// config validation enforces that before this is ever called.
    pub fn with_hs256(secret: &[u8], ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // No leeway; `verify` additionally rejects the exact expiry second.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// The payload carries `sub`, `email`, `iat`, and `exp = iat + ttl`.
    #[track_caller]
    pub fn issue(&self, subject: &str, email: &str) -> AuthErrorResult<String> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            email: email.to_string(),
            iat: now,
            exp: now + self.ttl_secs as i64,
        };
        claims.validate()?;

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::Issuance {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// The MAC is recomputed and compared in constant time inside
    /// `jsonwebtoken`; a bad signature rejects the token regardless of
    /// payload contents.
    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    ErrorKind::InvalidSignature => AuthError::SignatureInvalid {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::Malformed {
                        message: e.to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        // `jsonwebtoken` only rejects `exp < now` even with zero leeway, but
        // expiry here is inclusive: a token is invalid from the second it
        // expires.
        if chrono::Utc::now().timestamp() >= token_data.claims.exp {
            return Err(AuthError::TokenExpired {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }

    /// Configured token lifetime in seconds
    pub fn ttl_secs(&self) -> u64 {
        self.ttl_secs
    }
}
