pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::pool::{connect, connect_in_memory};
pub use error::{DbError, Result};
pub use repositories::user_repository::UserRepository;

/// Embedded schema migrations, applied at startup and by test pools
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
