//! Registration access policy.

use serde::Deserialize;

/// Who may create new accounts through `/register`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    /// Only a signed-in administrator may provision accounts.
    #[default]
    AdminOnly,
    /// Anyone, including anonymous visitors, may register.
    Open,
}

impl RegistrationPolicy {
    /// Whether `/register` is reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, RegistrationPolicy::Open)
    }

    /// Whether `/register` requires the session user to be an administrator.
    pub fn requires_admin(&self) -> bool {
        matches!(self, RegistrationPolicy::AdminOnly)
    }

    /// Where a successful registration lands.
    pub fn success_redirect(&self) -> &'static str {
        match self {
            RegistrationPolicy::AdminOnly => "/admin",
            RegistrationPolicy::Open => "/login",
        }
    }
}
