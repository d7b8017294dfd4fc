//! Middleware for the web front end.

pub mod auth;
pub mod rate_limit;
pub mod security;

pub use auth::{
    is_public_path, require_login, CurrentUser, SessionClaims, SessionKeys, LOGIN_PATH,
    REGISTER_PATH, SESSION_COOKIE,
};
pub use rate_limit::{client_ip, login_rate_limit, RateLimitState};
pub use security::security_headers;
