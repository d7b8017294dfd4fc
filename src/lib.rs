//! clubboard - a login-gated club bulletin board
//!
//! Members sign in, post short messages tagged with a club, and read the
//! feed. Administrators see every user and message and provision new
//! accounts.

pub mod auth;
pub mod board;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod i18n;
pub mod logging;
pub mod web;

pub use auth::{
    authenticate, ensure_admin, hash_password, register, validate_pin, validate_username,
    verify_password, PasswordError, RegistrationError, RegistrationPolicy, RegistrationRequest,
    ValidationError,
};
pub use board::{
    BoardService, FeedMode, FeedQuery, Message, MessageRepository, PostError, PostRequest,
};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{BoardError, Result};
pub use web::{create_router, AppState, WebServer};
