use thiserror::Error;

/// Portal-level error taxonomy. Handlers recover from these locally
/// (redisplayed forms, logged no-ops, redirects); nothing here is fatal to
/// the hosting process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("sync dispatch failed: {0}")]
    Sync(String),
}
