//! Input validation for account creation.

use thiserror::Error;

/// Number of digits in an account code.
pub const PIN_LENGTH: usize = 4;

/// Validation errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Username is empty (after trimming).
    #[error("username cannot be empty")]
    UsernameEmpty,

    /// Password is not exactly four ASCII digits.
    #[error("password must be exactly {PIN_LENGTH} digits")]
    PinInvalid,
}

/// Validate a username.
///
/// The only requirement is that it is non-empty once surrounding whitespace
/// is removed. Callers store the trimmed form.
///
/// # Examples
///
/// ```
/// use clubboard::auth::validation::validate_username;
///
/// assert!(validate_username("alice").is_ok());
/// assert!(validate_username("   ").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::UsernameEmpty);
    }
    Ok(())
}

/// Validate an account code: exactly four ASCII digits.
///
/// # Examples
///
/// ```
/// use clubboard::validate_pin;
///
/// assert!(validate_pin("0123").is_ok());
/// assert!(validate_pin("123").is_err());
/// assert!(validate_pin("12a4").is_err());
/// ```
pub fn validate_pin(pin: &str) -> Result<(), ValidationError> {
    if pin.len() != PIN_LENGTH || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::PinInvalid);
    }
    Ok(())
}
