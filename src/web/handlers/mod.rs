//! Page handlers for the web front end.

pub mod admin;
pub mod auth;
pub mod feed;
pub mod register;

pub use admin::*;
pub use auth::*;
pub use feed::*;
pub use register::*;

use std::sync::Arc;

use crate::auth::RegistrationPolicy;
use crate::i18n::Messages;
use crate::web::middleware::{RateLimitState, SessionKeys};
use crate::{Config, Database};

/// Database handle shared across handlers. The pool synchronizes internally.
pub type SharedDatabase = Arc<Database>;

/// Application state shared across handlers.
pub struct AppState {
    /// Database handle.
    pub db: SharedDatabase,
    /// Session cookie keys.
    pub sessions: SessionKeys,
    /// Who may open the registration page.
    pub registration: RegistrationPolicy,
    /// Display timezone for timestamps.
    pub timezone: String,
    /// UI strings.
    pub text: &'static Messages,
    /// Login attempt limiter.
    pub rate_limit: Arc<RateLimitState>,
}

impl AppState {
    /// Create application state with default policy, timezone, and locale.
    pub fn new(db: SharedDatabase, session_secret: &str, session_expiry_secs: u64) -> Self {
        Self {
            db,
            sessions: SessionKeys::new(session_secret, session_expiry_secs),
            registration: RegistrationPolicy::default(),
            timezone: "Asia/Tokyo".to_string(),
            text: Messages::for_locale(crate::i18n::DEFAULT_LOCALE),
            rate_limit: Arc::new(RateLimitState::new(5)),
        }
    }

    /// Create application state from a loaded configuration.
    pub fn from_config(db: SharedDatabase, config: &Config) -> Self {
        Self::new(db, &config.web.session_secret, config.web.session_expiry_secs)
            .with_secure_cookie(config.web.secure_cookie)
            .with_registration_policy(config.web.registration)
            .with_timezone(&config.server.timezone)
            .with_locale(&config.locale.language)
            .with_login_rate_limit(config.web.login_rate_limit)
    }

    /// Set the registration policy.
    pub fn with_registration_policy(mut self, policy: RegistrationPolicy) -> Self {
        self.registration = policy;
        self
    }

    /// Set the display timezone.
    pub fn with_timezone(mut self, timezone: &str) -> Self {
        self.timezone = timezone.to_string();
        self
    }

    /// Set the UI language.
    pub fn with_locale(mut self, locale: &str) -> Self {
        self.text = Messages::for_locale(locale);
        self
    }

    /// Set the number of login attempts allowed per minute per client.
    pub fn with_login_rate_limit(mut self, per_minute: u32) -> Self {
        self.rate_limit = Arc::new(RateLimitState::new(per_minute));
        self
    }

    /// Mark session cookies `Secure`.
    pub fn with_secure_cookie(mut self, secure: bool) -> Self {
        self.sessions = self.sessions.with_secure(secure);
        self
    }
}
