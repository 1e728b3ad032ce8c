//! Error types for the askup service.
//!
//! `StartupError` covers configuration and wiring failures before the server
//! runs. `ApiError` is what request handlers return; it renders as a fixed
//! JSON message and never exposes internal detail to the caller.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors that can occur during service initialization or execution.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to connect to or migrate the database.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] askup_repository::ItemStoreError),

    /// Failed to bind or serve the HTTP listener.
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}

impl StartupError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Errors returned by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No authenticated user on the request.
    #[error("Login required")]
    Unauthorized,

    /// Unknown username or wrong password; the two are not distinguished.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// Generic failure; the message is the fixed text shown to the caller.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    /// Logs `cause` and returns a generic failure carrying only `public_msg`.
    pub fn internal(public_msg: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        let public_msg = public_msg.into();
        error!(error = %cause, "{}", public_msg);
        Self::Internal(public_msg)
    }
}

/// Error response body.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Unauthorized | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Handler result type.
pub type ApiResult<T> = Result<T, ApiError>;
