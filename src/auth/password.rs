//! Password hashing and verification for clubboard.
//!
//! Uses Argon2id. Account passwords are short numeric codes, so the stored
//! hash is the only thing standing between a leaked database and the codes;
//! every hash carries its own random salt.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

/// Create the Argon2 hasher.
///
/// Parameters:
/// - Memory cost: 19 MiB (19456 KiB)
/// - Time cost: 2 iterations
/// - Parallelism: 1 lane
fn create_argon2() -> Result<Argon2<'static>, PasswordError> {
    let params = Params::new(19456, 2, 1, None)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;
    Ok(Argon2::new(
        argon2::Algorithm::Argon2id,
        argon2::Version::V0x13,
        params,
    ))
}

/// Hash a password using Argon2id.
///
/// Returns a PHC-formatted hash string that includes the salt and parameters.
///
/// # Examples
///
/// ```
/// use clubboard::hash_password;
///
/// let hash = hash_password("1234").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = create_argon2()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// Returns `Ok(())` if the password matches, or an error if it doesn't.
///
/// # Examples
///
/// ```
/// use clubboard::{hash_password, verify_password};
///
/// let hash = hash_password("1234").unwrap();
/// assert!(verify_password("1234", &hash).is_ok());
/// assert!(verify_password("4321", &hash).is_err());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    // Parameters come from the parsed hash, not from create_argon2()
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// [`hash_password`] on the blocking thread pool.
pub async fn hash_password_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::HashError(format!("hashing task failed: {e}")))?
}

/// [`verify_password`] on the blocking thread pool.
///
/// Argon2 holds a worker thread for tens of milliseconds, so request
/// handlers go through this instead of calling [`verify_password`] inline.
pub async fn verify_password_blocking(
    password: String,
    hash: String,
) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| PasswordError::HashError(format!("verification task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_password_format() {
        let hash = hash_password("1234").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("$v=19$"));
        assert!(hash.contains("m=19456,t=2,p=1"));
    }

    #[test]
    fn test_hash_password_is_salted() {
        let hash1 = hash_password("1234").unwrap();
        let hash2 = hash_password("1234").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_password() {
        let hash = hash_password("0042").unwrap();

        assert!(verify_password("0042", &hash).is_ok());
        assert!(matches!(
            verify_password("0043", &hash),
            Err(PasswordError::VerificationFailed)
        ));
        assert!(verify_password("", &hash).is_err());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        let result = verify_password("1234", "plaintext-not-a-hash");
        assert!(matches!(result, Err(PasswordError::InvalidHash)));
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let hash = hash_password_blocking("2468".to_string()).await.unwrap();

        assert!(verify_password_blocking("2468".to_string(), hash.clone())
            .await
            .is_ok());
        assert!(matches!(
            verify_password_blocking("8642".to_string(), hash).await,
            Err(PasswordError::VerificationFailed)
        ));
    }
}
