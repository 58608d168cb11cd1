use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] sid_config::ConfigError),

    #[error("Database error: {0}")]
    Db(#[from] sid_db::DbError),

    #[error("Crypto error: {0}")]
    Crypto(#[from] sid_crypto::CryptoError),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
