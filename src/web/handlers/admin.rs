//! Admin dashboard handler.

use axum::{extract::State, response::Html};
use std::sync::Arc;

use super::AppState;
use crate::board::MessageRepository;
use crate::db::UserRepository;
use crate::web::error::WebError;
use crate::BoardError;
use crate::web::middleware::CurrentUser;
use crate::web::views;

/// GET /admin - List all users and all messages, newest first.
///
/// The admin flag is read from the store, not the session, so a demoted
/// user loses access immediately.
pub async fn admin(
    State(state): State<Arc<AppState>>,
    CurrentUser(session): CurrentUser,
) -> Result<Html<String>, WebError> {
    let users = UserRepository::new(state.db.pool());

    let is_admin = users
        .get_by_id(session.sub)
        .await?
        .is_some_and(|user| user.is_admin);
    if !is_admin {
        tracing::warn!(
            user_id = session.sub,
            username = %session.username,
            "Non-admin denied admin dashboard"
        );
        return Err(BoardError::Permission(state.text.admins_only.to_string()).into());
    }

    let all_users = users.list_newest_first().await?;
    let messages = MessageRepository::new(state.db.pool())
        .list_newest_first()
        .await?;

    Ok(views::admin_page(
        state.text,
        &session,
        state.registration,
        &all_users,
        &messages,
        &state.timezone,
    ))
}
