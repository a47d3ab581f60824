//! Transport-level errors and their HTTP rendering.
//!
//! # Design
//! Every failure a handler can hit becomes an `AppError`, and every
//! `AppError` renders as the fixed `{message, details}` body with a 4xx
//! status, including requests no route or method matches. Store errors
//! convert through `From<TodoError>`; extractor rejections keep their own
//! status and text.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use todo_core::hal::NOT_FOUND_MESSAGE;
use todo_core::{present_error, TodoError};

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Todo(#[from] TodoError),

    /// A required creation field is missing or blank.
    #[error("{0}")]
    Validation(String),

    /// The request could not be decoded (path or body).
    #[error("{message}")]
    BadRequest { status: StatusCode, message: String },

    #[error("no route for {method} {path}")]
    NoRoute { method: Method, path: String },

    #[error("method {method} not allowed on {path}")]
    MethodNotAllowed { method: Method, path: String },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Todo(TodoError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::BadRequest { status, .. } => *status,
            AppError::NoRoute { .. } => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Todo(TodoError::NotFound { .. }) => NOT_FOUND_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(present_error(self.client_message()))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

/// Startup failures returned from `main`.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_a_client_error() {
        let err = AppError::from(TodoError::NotFound { id: 5 });
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert!(err.status().is_client_error());
        assert_eq!(err.client_message(), "Todo Not Found");
    }

    #[test]
    fn validation_is_bad_request() {
        let err = AppError::Validation("desc must not be empty".to_string());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "desc must not be empty");
    }
}
