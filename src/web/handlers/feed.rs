//! Feed handlers: list messages and accept new posts.

use axum::{
    extract::{ConnectInfo, Form, Query, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::{net::SocketAddr, sync::Arc};

use super::AppState;
use crate::board::{BoardService, FeedQuery, PostError, PostRequest};
use crate::web::error::WebError;
use crate::web::middleware::CurrentUser;
use crate::web::views::{self, FeedPage};

/// Feed query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct FeedParams {
    /// `list` for strict newest-first ordering.
    pub mode: Option<String>,
    /// Exact club filter.
    pub club: Option<String>,
    /// Code of a rejected post, set by the post redirect.
    pub error: Option<String>,
}

/// New post form fields.
#[derive(Debug, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub body: String,
    pub club: Option<String>,
}

/// GET / - Show the feed.
pub async fn feed(
    State(state): State<Arc<AppState>>,
    CurrentUser(session): CurrentUser,
    Query(params): Query<FeedParams>,
) -> Result<Html<String>, WebError> {
    let query = FeedQuery::from_params(params.mode.as_deref(), params.club.as_deref());
    let service = BoardService::new(state.db.pool());

    let messages = service.feed(&query).await?;
    let clubs = service.clubs().await?;
    let error = params
        .error
        .as_deref()
        .and_then(PostError::from_code)
        .and_then(|err| state.text.post_error(&err));

    Ok(views::feed_page(&FeedPage {
        text: state.text,
        session: &session,
        registration: state.registration,
        query: &query,
        messages: &messages,
        clubs: &clubs,
        error,
        timezone: &state.timezone,
    }))
}

/// POST / - Post a message as the signed-in user.
///
/// Always redirects back to the feed view the form was posted from; a
/// rejected post carries its error code in the query string.
pub async fn post_message(
    State(state): State<Arc<AppState>>,
    CurrentUser(session): CurrentUser,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    Query(params): Query<FeedParams>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, WebError> {
    let view = FeedQuery::from_params(params.mode.as_deref(), params.club.as_deref());
    let back = views::feed_href(view.mode, view.club.as_deref());

    let ip = connect_info.map(|ConnectInfo(addr)| addr.ip().to_string());
    let request = PostRequest::new(form.body, form.club);

    match BoardService::new(state.db.pool())
        .post(&session.username, &request, ip)
        .await
    {
        Ok(_) => Ok(Redirect::to(&back)),
        Err(err) => match err.code() {
            Some(code) => Ok(Redirect::to(&with_error(&back, code))),
            None => Err(err.into()),
        },
    }
}

/// Append `error=<code>` to a feed link.
fn with_error(href: &str, code: &str) -> String {
    let separator = if href.contains('?') { '&' } else { '?' };
    format!("{href}{separator}error={code}")
}
