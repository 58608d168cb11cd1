//! Identity orchestration: register, login, fetch-profile.
//!
//! This is the only component that touches both the at-rest form
//! (`IdentityRecord`) and the in-transit form (`UserProfile`). Password
//! hashing, verification, and field encryption run on the blocking pool so
//! the async executor never stalls on Argon2 or PBKDF2.

use crate::identity::error::{IdentityError, Result as IdentityResult};

use sid_auth::{LoginRateLimiter, RateLimitConfig, SessionTokenService};
use sid_core::{
    AuthResponse, IdentityRecord, UserProfile, normalize_email, normalize_id_number,
    require_non_empty,
};
use sid_crypto::{AtRestCipher, PasswordHasher};
use sid_db::UserRepository;

use std::sync::Arc;

use log::{info, warn};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Raw registration input, exactly as the caller supplied it
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub id_number: String,
}

pub struct IdentityService {
    repo: UserRepository,
    hasher: Arc<PasswordHasher>,
    cipher: Arc<AtRestCipher>,
    tokens: Arc<SessionTokenService>,
    login_limiter: LoginRateLimiter,
    /// Verified against when the email is unknown, so both login failure
    /// paths perform one full Argon2 verification.
    dummy_hash: String,
}

impl IdentityService {
    pub fn new(
        pool: SqlitePool,
        cipher: AtRestCipher,
        tokens: Arc<SessionTokenService>,
        rate_limit: RateLimitConfig,
    ) -> IdentityResult<Self> {
        let hasher = PasswordHasher::new();
        let dummy_hash = hasher.hash("decoy-credential-for-unknown-accounts")?;

        Ok(Self {
            repo: UserRepository::new(pool),
            hasher: Arc::new(hasher),
            cipher: Arc::new(cipher),
            tokens,
            login_limiter: LoginRateLimiter::new(rate_limit),
            dummy_hash,
        })
    }

    /// Register a new user and issue a session token.
    pub async fn register(&self, registration: Registration) -> IdentityResult<AuthResponse> {
        let email = normalize_email(&registration.email)?;
        require_non_empty("password", &registration.password)?;
        require_non_empty("full_name", &registration.full_name)?;
        let full_name = registration.full_name.trim().to_string();
        let id_number = normalize_id_number(&registration.id_number)?;

        let password_hash = self.hash_password(registration.password).await?;
        let encrypted_id_number = self.encrypt_field(id_number.clone()).await?;

        let record = IdentityRecord::new(
            email.clone(),
            password_hash,
            full_name.clone(),
            encrypted_id_number,
        );

        self.repo.insert(&record).await?;

        let token = self.tokens.issue(&record.id.to_string(), &email)?;

        info!("Registered user {}", record.id);

        Ok(AuthResponse {
            user: UserProfile {
                id: record.id,
                email,
                full_name,
                id_number,
                created_at: record.created_at,
            },
            token,
        })
    }

    /// Verify credentials and issue a session token.
    ///
    /// An unknown email and a wrong password return the same error, and
    /// both paths run one full password verification.
    pub async fn login(&self, email: &str, password: &str) -> IdentityResult<AuthResponse> {
        // A malformed email is treated like any other bad credential.
        let email =
            normalize_email(email).map_err(|_| IdentityError::invalid_credentials())?;

        self.login_limiter.check(&email)?;

        let record = self.repo.find_by_email(&email).await?;

        let Some(record) = record else {
            // Burn the same verification work as the found-user path.
            let _ = self
                .verify_password(password.to_string(), self.dummy_hash.clone())
                .await;
            return Err(IdentityError::invalid_credentials());
        };

        let verified = self
            .verify_password(password.to_string(), record.password_hash.clone())
            .await?;
        if !verified {
            warn!("Failed login attempt for user {}", record.id);
            return Err(IdentityError::invalid_credentials());
        }

        let id_number = self.decrypt_field(record.encrypted_id_number.clone()).await?;
        let token = self.tokens.issue(&record.id.to_string(), &record.email)?;

        info!("User {} logged in", record.id);

        Ok(AuthResponse {
            user: UserProfile {
                id: record.id,
                email: record.email,
                full_name: record.full_name,
                id_number,
                created_at: record.created_at,
            },
            token,
        })
    }

    /// Drop idle rate-limiter keys.
    ///
    /// The limiter tracks every email ever attempted; a periodic background
    /// task calls this so abandoned keys do not accumulate.
    pub fn prune_rate_limiter(&self) {
        self.login_limiter.prune();
    }

    /// Load and decrypt the profile for a verified subject.
    pub async fn fetch_profile(&self, id: Uuid) -> IdentityResult<UserProfile> {
        let record = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(IdentityError::not_found)?;

        let id_number = self.decrypt_field(record.encrypted_id_number.clone()).await?;

        Ok(UserProfile {
            id: record.id,
            email: record.email,
            full_name: record.full_name,
            id_number,
            created_at: record.created_at,
        })
    }

    async fn hash_password(&self, password: String) -> IdentityResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| IdentityError::internal(format!("hashing task failed: {e}")))?
            .map_err(IdentityError::from)
    }

    async fn verify_password(&self, password: String, stored: String) -> IdentityResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| IdentityError::internal(format!("verification task failed: {e}")))?
            .map_err(IdentityError::from)
    }

    async fn encrypt_field(&self, plaintext: String) -> IdentityResult<String> {
        let cipher = Arc::clone(&self.cipher);
        tokio::task::spawn_blocking(move || cipher.encrypt(&plaintext))
            .await
            .map_err(|e| IdentityError::internal(format!("encryption task failed: {e}")))?
            .map_err(IdentityError::from)
    }

    async fn decrypt_field(&self, bundle: String) -> IdentityResult<String> {
        let cipher = Arc::clone(&self.cipher);
        tokio::task::spawn_blocking(move || cipher.decrypt(&bundle))
            .await
            .map_err(|e| IdentityError::internal(format!("decryption task failed: {e}")))?
            .map_err(IdentityError::from)
    }
}
