use sid_core::IdentityRecord;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sid_db::MIGRATOR
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// A stored-shape record with plausible (but fake) credential material
pub fn sample_record(email: &str) -> IdentityRecord {
    IdentityRecord::new(
        email.to_string(),
        "$argon2id$v=19$m=19456,t=2,p=1$c29tZXNhbHQ$c29tZWRpZ2VzdA".to_string(),
        "Jane Doe".to_string(),
        "AAAAAAAAAAAAAAAAZmFrZSBjaXBoZXJ0ZXh0IGJ1bmRsZQ==".to_string(),
    )
}
