//! Board service: validated posting and feed retrieval.

use thiserror::Error;
use tracing::{debug, info};

use super::feed::FeedQuery;
use super::message::{Message, NewMessage};
use super::message_repository::MessageRepository;
use crate::db::DbPool;
use crate::{BoardError, Result};

/// Reasons a post is not accepted.
#[derive(Error, Debug)]
pub enum PostError {
    /// Body is empty after trimming.
    #[error("message body cannot be empty")]
    EmptyBody,

    /// Club is missing or blank.
    #[error("a club must be selected")]
    MissingClub,

    /// The store failed while inserting.
    #[error(transparent)]
    Database(#[from] BoardError),
}

impl PostError {
    /// Short code carried in the feed redirect for validation failures.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            PostError::EmptyBody => Some("empty_body"),
            PostError::MissingClub => Some("missing_club"),
            PostError::Database(_) => None,
        }
    }

    /// Recover a validation failure from its redirect code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "empty_body" => Some(PostError::EmptyBody),
            "missing_club" => Some(PostError::MissingClub),
            _ => None,
        }
    }
}

/// Raw post input as submitted.
#[derive(Debug, Clone, Default)]
pub struct PostRequest {
    /// Message text (trimmed before storing).
    pub body: String,
    /// Club label (trimmed before storing).
    pub club: Option<String>,
}

impl PostRequest {
    /// Create a post request.
    pub fn new(body: impl Into<String>, club: Option<String>) -> Self {
        Self {
            body: body.into(),
            club,
        }
    }

    /// Trim and check the fields, returning `(body, club)`.
    pub fn validate(&self) -> std::result::Result<(String, String), PostError> {
        let body = self.body.trim();
        if body.is_empty() {
            return Err(PostError::EmptyBody);
        }
        let club = self
            .club
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(PostError::MissingClub)?;
        Ok((body.to_string(), club.to_string()))
    }
}

/// Board operations used by the feed handler.
pub struct BoardService<'a> {
    pool: &'a DbPool,
}

impl<'a> BoardService<'a> {
    /// Create a new service over the given pool.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Validate and store a message attributed to `author`.
    ///
    /// `author` is copied into the row as-is; it is a snapshot, not a
    /// reference to the user.
    pub async fn post(
        &self,
        author: &str,
        request: &PostRequest,
        ip: Option<String>,
    ) -> std::result::Result<Message, PostError> {
        let (body, club) = request.validate().inspect_err(|e| {
            debug!(author = %author, error = %e, "Post rejected");
        })?;

        let mut new_message = NewMessage::new(author, body, club);
        if let Some(ip) = ip {
            new_message = new_message.with_ip(ip);
        }

        let message = MessageRepository::new(self.pool).create(&new_message).await?;
        info!(message_id = message.id, author = %author, club = %message.club, "Message posted");
        Ok(message)
    }

    /// Messages for the feed.
    pub async fn feed(&self, query: &FeedQuery) -> Result<Vec<Message>> {
        MessageRepository::new(self.pool).list(query).await
    }

    /// Club labels for the filter navigation.
    pub async fn clubs(&self) -> Result<Vec<String>> {
        MessageRepository::new(self.pool).list_clubs().await
    }
}
