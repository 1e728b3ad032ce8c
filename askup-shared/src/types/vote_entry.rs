use serde::{Deserialize, Serialize};

use crate::types::{UserId, VoteDirection};

/// A user's active vote on a votable item.
///
/// Serialized as `{"user_id": ..., "type": "up" | "down"}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteEntry {
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub direction: VoteDirection,
}

impl VoteEntry {
    pub fn new(user_id: UserId, direction: VoteDirection) -> Self {
        Self { user_id, direction }
    }
}
