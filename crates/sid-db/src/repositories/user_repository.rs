//! User repository - the persistence seam for identity records.
//!
//! Documents are keyed by `id` with a secondary unique index on `email`.
//! Duplicate-email detection happens inside the insert itself (the unique
//! index raises the conflict), never as a separate lookup.

use crate::error::{DbError, Result as DbErrorResult};

use sid_core::IdentityRecord;

use std::panic::Location;

use chrono::DateTime;
use error_location::ErrorLocation;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new record; `DbError::DuplicateEmail` when the email's
    /// unique index rejects it.
    pub async fn insert(&self, record: &IdentityRecord) -> DbErrorResult<()> {
        let id = record.id.to_string();
        let created_at = record.created_at.timestamp();

        sqlx::query(
            r#"
                INSERT INTO users (
                    id, email, password_hash, full_name,
                    encrypted_id_number, created_at
                ) VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&record.email)
        .bind(&record.password_hash)
        .bind(&record.full_name)
        .bind(&record.encrypted_id_number)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(())
    }

    pub async fn find_by_email(&self, email: &str) -> DbErrorResult<Option<IdentityRecord>> {
        let row = sqlx::query(
            r#"
                SELECT id, email, password_hash, full_name,
                    encrypted_id_number, created_at
                FROM users
                WHERE email = ?
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(decode_record).transpose()
    }

    pub async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<IdentityRecord>> {
        let id_str = id.to_string();

        let row = sqlx::query(
            r#"
                SELECT id, email, password_hash, full_name,
                    encrypted_id_number, created_at
                FROM users
                WHERE id = ?
            "#,
        )
        .bind(id_str)
        .fetch_optional(&self.pool)
        .await?;

        row.map(decode_record).transpose()
    }

    /// Total number of stored records (used by tests and health reporting)
    pub async fn count(&self) -> DbErrorResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("n")?)
    }
}

#[track_caller]
fn map_insert_error(e: sqlx::Error) -> DbError {
    if e.as_database_error()
        .is_some_and(|db| matches!(db.kind(), sqlx::error::ErrorKind::UniqueViolation))
    {
        DbError::DuplicateEmail {
            location: ErrorLocation::from(Location::caller()),
        }
    } else {
        DbError::from(e)
    }
}

fn decode_record(row: SqliteRow) -> DbErrorResult<IdentityRecord> {
    let id: String = row.try_get("id")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(IdentityRecord {
        id: Uuid::parse_str(&id)
            .map_err(|e| DbError::corrupt(format!("invalid UUID in users.id: {e}")))?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        full_name: row.try_get("full_name")?,
        encrypted_id_number: row.try_get("encrypted_id_number")?,
        created_at: DateTime::from_timestamp(created_at, 0)
            .ok_or_else(|| DbError::corrupt("invalid timestamp in users.created_at"))?,
    })
}
