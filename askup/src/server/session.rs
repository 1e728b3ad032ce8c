//! Resolves the acting user of a request.
//!
//! Cookie sessions are handled by the upstream session layer, which forwards
//! the authenticated user id in a configured header. Handlers pass the
//! resulting id explicitly to everything below them.
use askup_shared::types::UserId;
use axum::http::{HeaderMap, HeaderName};
use uuid::Uuid;

use crate::errors::ApiError;

/// Returns the authenticated user, or `ApiError::Unauthorized` when the
/// header is missing or does not hold a user id.
pub fn acting_user(headers: &HeaderMap, header: &HeaderName) -> Result<UserId, ApiError> {
    headers
        .get(header)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .ok_or(ApiError::Unauthorized)
}
