//! This module defines the `VoteLedger`, which applies a user's vote to an
//! item and persists the resulting tally.
mod transition;

pub use transition::{VoteOutcome, apply_vote};

use std::sync::Arc;

use askup_repository::ItemStore;
use askup_shared::types::{ItemId, UserId, VoteDirection};
use tracing::{debug, instrument, warn};

use crate::errors::LedgerError;

/// How the ledger writes the updated vote fields back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoteMode {
    /// Unconditional read-modify-write. Concurrent votes on the same item can
    /// overwrite each other (lost updates). This is the reference behavior.
    #[default]
    Baseline,
    /// Conditional write keyed on the state that was read. A concurrent change
    /// makes the vote fail with `LedgerError::Conflict` instead of being lost.
    Atomic,
}

impl VoteMode {
    /// Parses `"baseline"` or `"atomic"` (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "baseline" => Some(Self::Baseline),
            "atomic" => Some(Self::Atomic),
            _ => None,
        }
    }
}

/// `VoteLedger` records, toggles and tallies per-user votes on one kind of
/// votable item.
///
/// It holds no mutable state of its own; every call owns its read, its
/// in-memory transition and its single write.
pub struct VoteLedger {
    store: Arc<dyn ItemStore>,
    mode: VoteMode,
}

impl VoteLedger {
    /// Creates a ledger in `VoteMode::Baseline` over the given store.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self::with_mode(store, VoteMode::Baseline)
    }

    pub fn with_mode(store: Arc<dyn ItemStore>, mode: VoteMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> VoteMode {
        self.mode
    }

    /// Casts `direction` on behalf of `user_id` and returns the new tally.
    ///
    /// Performs exactly one read of the item and, on success, exactly one
    /// write of its vote fields.
    ///
    /// # Errors
    ///
    /// * `LedgerError::NotFound` - No item with `item_id`; nothing is written
    /// * `LedgerError::Persistence` - The store failed to read or write
    /// * `LedgerError::Conflict` - Atomic mode only; the item changed after it was read
    #[instrument(skip(self), fields(mode = ?self.mode))]
    pub async fn cast_vote(
        &self,
        item_id: ItemId,
        user_id: UserId,
        direction: VoteDirection,
    ) -> Result<i64, LedgerError> {
        let item = self
            .store
            .find_by_id(item_id)
            .await?
            .ok_or(LedgerError::NotFound(item_id))?;

        let mut state = item.state.clone();
        let outcome = apply_vote(&mut state, user_id, direction);

        match self.mode {
            VoteMode::Baseline => {
                self.store
                    .update_vote_fields(item_id, state.votes, &state.voted_by)
                    .await?;
            }
            VoteMode::Atomic => {
                let written = self
                    .store
                    .update_vote_fields_if_unchanged(item_id, &item.state, state.votes, &state.voted_by)
                    .await?;
                if !written {
                    warn!(%item_id, %user_id, "Vote fields changed concurrently, vote rejected");
                    return Err(LedgerError::Conflict(item_id));
                }
            }
        }

        debug!(
            %item_id,
            %user_id,
            kind = item.kind.as_str(),
            direction = direction.as_str(),
            outcome = ?outcome,
            votes = state.votes,
            "Vote recorded"
        );

        Ok(state.votes)
    }
}
