//! Authentication module for clubboard.
//!
//! This module provides password hashing, credential checks, account
//! validation, registration, and the registration access policy.

mod login;
mod password;
mod policy;
mod registration;
pub mod validation;

pub use login::authenticate;
pub use password::{
    hash_password, hash_password_blocking, verify_password, verify_password_blocking, PasswordError,
};
pub use policy::RegistrationPolicy;
pub use registration::{ensure_admin, register, RegistrationError, RegistrationRequest};
pub use validation::{validate_pin, validate_username, ValidationError, PIN_LENGTH};
