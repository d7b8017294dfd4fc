//! Session cookie handling and the login gate.
//!
//! The session is an HS256 JWT carried in an `HttpOnly` cookie. The gate
//! decodes it on every request, lets the allow-listed paths through, and
//! redirects everything else to `/login` when no valid session is present.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::RegistrationPolicy;
use crate::db::{User, UserRepository};
use crate::web::error::WebError;
use crate::web::handlers::AppState;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "clubboard_session";

/// Login page path; every gate redirect lands here.
pub const LOGIN_PATH: &str = "/login";

/// Registration page path.
pub const REGISTER_PATH: &str = "/register";

/// Session claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user ID).
    pub sub: i64,
    /// Username at login time.
    pub username: String,
    /// Admin flag at login time. Display only; authorization re-reads the store.
    pub is_admin: bool,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
    /// Session ID.
    pub jti: String,
}

/// Keys and settings for issuing and verifying session cookies.
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_secs: u64,
    secure: bool,
}

impl SessionKeys {
    /// Create session keys from a secret.
    pub fn new(secret: &str, expiry_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry_secs,
            secure: false,
        }
    }

    /// Mark issued cookies `Secure`.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Issue a session token for a user.
    pub fn issue(&self, user: &User) -> Result<String, WebError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let claims = SessionClaims {
            sub: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
            iat: now,
            exp: now + self.expiry_secs,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {}", e);
            WebError::internal("Internal Server Error")
        })
    }

    /// Verify a session token. Invalid, tampered, and expired tokens yield `None`.
    pub fn verify(&self, token: &str) -> Option<SessionClaims> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("Session validation failed: {}", e);
                None
            }
        }
    }

    /// Build the cookie carrying a session token.
    pub fn session_cookie(&self, token: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build()
    }

    /// Cookie used to clear the session.
    pub fn removal_cookie() -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, "")).path("/").build()
    }
}

/// Extractor for the signed-in user.
///
/// The gate stores verified claims in the request extensions; handlers
/// behind it take them from there. Without claims the request is sent to
/// the login page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub SessionClaims);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionClaims>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| Redirect::to(LOGIN_PATH))
    }
}

/// Paths reachable without a session.
pub fn is_public_path(path: &str, policy: RegistrationPolicy) -> bool {
    match path {
        LOGIN_PATH | "/health" | "/static" => true,
        REGISTER_PATH => policy.is_public(),
        _ => path.starts_with("/static/"),
    }
}

/// Login gate middleware.
///
/// Runs before every routed request. Never mutates the session.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let claims = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.sessions.verify(cookie.value()));
    let path = request.uri().path().to_string();

    if let Some(ref claims) = claims {
        request.extensions_mut().insert(claims.clone());
    }

    if is_public_path(&path, state.registration) {
        return next.run(request).await;
    }

    let Some(claims) = claims else {
        tracing::debug!(path = %path, "Anonymous request redirected to login");
        return Redirect::to(LOGIN_PATH).into_response();
    };

    if path == REGISTER_PATH && state.registration.requires_admin() {
        match UserRepository::new(state.db.pool()).get_by_id(claims.sub).await {
            Ok(Some(user)) if user.is_admin => {}
            Ok(_) => {
                tracing::warn!(
                    user_id = claims.sub,
                    username = %claims.username,
                    "Non-admin redirected away from registration"
                );
                return Redirect::to(LOGIN_PATH).into_response();
            }
            Err(e) => return WebError::from(e).into_response(),
        }
    }

    next.run(request).await
}
