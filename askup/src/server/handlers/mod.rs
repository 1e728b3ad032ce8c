//! HTTP request handlers.
pub mod accounts;
pub mod answers;
pub mod health;
pub mod profile;
pub mod questions;
pub mod votes;

use askup_repository::ItemStoreError;
use askup_shared::types::UserId;

use crate::server::AppState;
use crate::server::views::ANONYMOUS;

/// Display name of an author, or `"Anonymous"` if the user is unknown.
pub(crate) async fn author_name(state: &AppState, user_id: UserId) -> Result<String, ItemStoreError> {
    Ok(state
        .users
        .find_user(user_id)
        .await?
        .map(|user| user.username)
        .unwrap_or_else(|| ANONYMOUS.to_string()))
}
