//! Login and logout handlers.

use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use std::sync::Arc;

use super::AppState;
use crate::auth::authenticate;
use crate::web::error::WebError;
use crate::web::middleware::{SessionKeys, LOGIN_PATH};
use crate::web::views;

/// Login form fields.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login - Show the login form.
pub async fn login_form(State(state): State<Arc<AppState>>) -> Html<String> {
    views::login_page(state.text, None)
}

/// POST /login - Check credentials and start a session.
///
/// Unknown usernames and wrong passwords render the same message.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    let username = form.username.trim();
    let password = form.password.trim();

    let Some(user) = authenticate(state.db.pool(), username, password).await? else {
        tracing::info!(username = %username, "Login rejected");
        return Ok(views::login_page(state.text, Some(state.text.login_failed)).into_response());
    };

    let token = state.sessions.issue(&user)?;

    Ok((jar.add(state.sessions.session_cookie(token)), Redirect::to("/")).into_response())
}

/// GET /logout - Clear the session.
pub async fn logout(jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(SessionKeys::removal_cookie()), Redirect::to(LOGIN_PATH))
}
