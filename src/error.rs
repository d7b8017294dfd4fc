//! Error types for clubboard.

use thiserror::Error;

/// Common error type for clubboard.
#[derive(Error, Debug)]
pub enum BoardError {
    /// Database error.
    ///
    /// Wraps every store failure that is not a uniqueness violation
    /// (connectivity, lock contention, malformed rows).
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error.
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// A UNIQUE constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for BoardError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return BoardError::Conflict(db_err.message().to_string());
            }
        }
        BoardError::Database(e.to_string())
    }
}

/// Result type alias for clubboard operations.
pub type Result<T> = std::result::Result<T, BoardError>;
