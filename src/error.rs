//! Error types for the library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Stable numeric codes exposed in error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthenticated = 2,
    DbFailure = 3,
    BadValue = 4,
    PasswordMismatch = 5,
    DuplicateEmail = 6,
    InvalidCredentials = 7,
    NoSuchBook = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Book not found.")]
    BookNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort();
        AppError::InvalidInput(format!("invalid or missing fields: {}", fields.join(", ")))
    }
}

/// Error response body, doubling as the notice shown to the user
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::PasswordMismatch => (StatusCode::BAD_REQUEST, ErrorCode::PasswordMismatch),
            AppError::DuplicateEmail => (StatusCode::CONFLICT, ErrorCode::DuplicateEmail),
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, ErrorCode::InvalidCredentials)
            }
            AppError::Unauthenticated => (StatusCode::SEE_OTHER, ErrorCode::NotAuthenticated),
            AppError::BookNotFound => (StatusCode::NOT_FOUND, ErrorCode::NoSuchBook),
            AppError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DbFailure),
            AppError::Session(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            // Pages behind the session guard send the browser back to the login form
            AppError::Unauthenticated => return Redirect::to("/login").into_response(),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Database error".to_string()
            }
            AppError::Session(e) => {
                tracing::error!("Session error: {}", e);
                "Internal server error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            AppError::InvalidInput(msg) => msg.clone(),
            other => other.to_string(),
        };

        let (status, code) = self.status_and_code();
        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
