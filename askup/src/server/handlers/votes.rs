use askup_ledger::LedgerError;
use askup_shared::types::{ItemKind, VoteDirection};
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use tracing::warn;
use uuid::Uuid;

use crate::errors::{ApiError, ApiResult};
use crate::server::AppState;
use crate::server::session::acting_user;
use crate::server::views::VoteTally;

const VOTING_FAILED: &str = "Voting failed";

/// Casts, retracts or flips the acting user's vote and returns the new tally.
///
/// `item_type` other than `"question"` targets answers; `vote_type` other
/// than `"up"` is a downvote.
pub async fn vote(
    State(state): State<AppState>,
    Path((item_type, item_id, vote_type)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> ApiResult<Json<VoteTally>> {
    let user_id = acting_user(&headers, &state.session_user_header)?;
    let item_id = Uuid::parse_str(&item_id).map_err(|e| ApiError::internal(VOTING_FAILED, e))?;

    let kind = ItemKind::from_route_segment(&item_type);
    let direction = VoteDirection::from_param(&vote_type);

    match state.ledger(kind).cast_vote(item_id, user_id, direction).await {
        Ok(votes) => Ok(Json(VoteTally { votes })),
        Err(LedgerError::NotFound(_)) => {
            warn!(%item_id, kind = kind.as_str(), "Vote on missing item");
            Err(ApiError::not_found("Item not found"))
        }
        Err(e) => Err(ApiError::internal(VOTING_FAILED, e)),
    }
}
