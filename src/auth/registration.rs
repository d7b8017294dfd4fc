//! User registration and bootstrap administrator seeding.

use thiserror::Error;
use tracing::info;

use crate::auth::validation::{validate_pin, validate_username, ValidationError};
use crate::auth::{hash_password_blocking, PasswordError};
use crate::db::{DbPool, NewUser, User, UserRepository};
use crate::BoardError;

/// Registration-specific errors.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Validation failed.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The store rejected the username as a duplicate.
    #[error("username already exists")]
    UsernameTaken,

    /// Password hashing failed.
    #[error("password error: {0}")]
    Password(#[from] PasswordError),

    /// Any other store failure.
    #[error("database error: {0}")]
    Database(BoardError),
}

impl From<BoardError> for RegistrationError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::Conflict(_) => RegistrationError::UsernameTaken,
            other => RegistrationError::Database(other),
        }
    }
}

/// Registration request data.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    /// Desired username (trimmed before storing).
    pub username: String,
    /// 4-digit account code.
    pub pin: String,
}

impl RegistrationRequest {
    /// Create a new registration request.
    pub fn new(username: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            pin: pin.into(),
        }
    }
}

/// Register a new non-admin user.
///
/// Uniqueness is left to the store: the UNIQUE constraint on `username` is
/// the single source of truth and its violation maps to
/// [`RegistrationError::UsernameTaken`].
pub async fn register(
    pool: &DbPool,
    request: &RegistrationRequest,
) -> Result<User, RegistrationError> {
    let username = request.username.trim();
    validate_username(username)?;
    validate_pin(&request.pin)?;

    let password_hash = hash_password_blocking(request.pin.clone()).await?;

    let repo = UserRepository::new(pool);
    let user = repo.create(&NewUser::new(username, password_hash)).await?;

    info!(user_id = user.id, username = %user.username, "User registered");
    Ok(user)
}

/// Create the bootstrap administrator unless that username already exists.
///
/// Returns `true` when the account was created by this call.
pub async fn ensure_admin(pool: &DbPool, username: &str, pin: &str) -> crate::Result<bool> {
    let repo = UserRepository::new(pool);
    if repo.username_exists(username).await? {
        return Ok(false);
    }

    validate_pin(pin).map_err(|e| BoardError::Validation(e.to_string()))?;
    let password_hash = hash_password_blocking(pin.to_string())
        .await
        .map_err(|e| BoardError::Auth(e.to_string()))?;

    match repo.create(&NewUser::new(username, password_hash).admin()).await {
        Ok(user) => {
            info!(user_id = user.id, username = %user.username, "Admin account created");
            Ok(true)
        }
        // Lost a race with another process seeding the same file
        Err(BoardError::Conflict(_)) => Ok(false),
        Err(e) => Err(e),
    }
}
