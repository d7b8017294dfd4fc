//! Error responses for the web layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Web error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Forbidden (403).
    Forbidden,
    /// Too many requests (429).
    TooManyRequests,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::Forbidden => StatusCode::FORBIDDEN,
            ErrorCode::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Web error type. Rendered as a plain-text body with the matching status.
#[derive(Debug)]
pub struct WebError {
    code: ErrorCode,
    message: String,
}

impl WebError {
    /// Create a new web error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Create a rate-limited error.
    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::TooManyRequests, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        (self.code.status_code(), self.message).into_response()
    }
}

impl std::fmt::Display for WebError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for WebError {}

impl From<crate::BoardError> for WebError {
    fn from(err: crate::BoardError) -> Self {
        match &err {
            crate::BoardError::Permission(msg) => WebError::forbidden(msg.clone()),
            _ => {
                tracing::error!("Internal error: {}", err);
                WebError::internal("Internal Server Error")
            }
        }
    }
}

impl From<crate::auth::RegistrationError> for WebError {
    fn from(err: crate::auth::RegistrationError) -> Self {
        tracing::error!("Registration failed: {}", err);
        WebError::internal("Internal Server Error")
    }
}

impl From<crate::board::PostError> for WebError {
    fn from(err: crate::board::PostError) -> Self {
        match err {
            crate::board::PostError::Database(e) => e.into(),
            other => {
                tracing::error!("Unhandled post error: {}", other);
                WebError::internal("Internal Server Error")
            }
        }
    }
}
