//! Account registration handlers.

use axum::{
    extract::{Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;

use super::AppState;
use crate::auth::{self, RegistrationRequest};
use crate::web::error::WebError;
use crate::web::views;

/// Registration form fields. The numeric password is also accepted as `pin`.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default, alias = "pin")]
    pub password: String,
}

/// GET /register - Show the registration form.
pub async fn register_form(State(state): State<Arc<AppState>>) -> Html<String> {
    views::register_page(state.text, None)
}

/// POST /register - Create a non-admin account.
///
/// Validation failures and duplicate usernames re-render the empty form
/// with an inline message.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Result<Response, WebError> {
    let request = RegistrationRequest::new(form.username, form.password);

    match auth::register(state.db.pool(), &request).await {
        Ok(_) => Ok(Redirect::to(state.registration.success_redirect()).into_response()),
        Err(err) => match state.text.registration_error(&err) {
            Some(message) => {
                tracing::info!(error = %err, "Registration rejected");
                Ok(views::register_page(state.text, Some(message)).into_response())
            }
            None => Err(err.into()),
        },
    }
}
