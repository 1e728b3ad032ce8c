use axum::{http::StatusCode, response::IntoResponse};

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "askup is running")
}
