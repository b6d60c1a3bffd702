use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Errors that can occur when interacting with the user store.
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] MigrateError),

    #[error("User store unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, UserStoreError>;
