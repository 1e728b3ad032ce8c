use serde::{Deserialize, Serialize};

use crate::types::{ItemId, ItemKind, VoteEntry};

/// Net tally and voter record of a votable item.
///
/// `votes` is a cached value kept in sync with `voted_by` only by the vote
/// operation; it is never recomputed on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteState {
    pub votes: i64,
    pub voted_by: Vec<VoteEntry>,
}

/// A question or an answer as seen by the vote ledger.
///
/// Carries only the fields voting needs; the rest of the document stays in
/// its own store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VotableItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub state: VoteState,
}

impl VotableItem {
    pub fn new(id: ItemId, kind: ItemKind, votes: i64, voted_by: Vec<VoteEntry>) -> Self {
        Self {
            id,
            kind,
            state: VoteState { votes, voted_by },
        }
    }
}
