//! This module defines the `ItemStore` trait, the only storage surface the
//! vote ledger depends on.
use askup_shared::types::{ItemId, VotableItem, VoteEntry, VoteState};
use crate::errors::ItemStoreError;

/// A trait that defines get/update-by-id access to the vote fields of one
/// kind of votable item.
///
/// Each implementor is bound to a single item kind (questions or answers).
#[async_trait::async_trait]
pub trait ItemStore: Send + Sync {
    /// Loads the item with the given id.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(item))` - The item and its current vote state
    /// * `Ok(None)` - No item with this id exists
    /// * `Err(ItemStoreError)` - The store could not be read
    async fn find_by_id(&self, id: ItemId) -> Result<Option<VotableItem>, ItemStoreError>;

    /// Overwrites the tally and voter record of an item in a single update.
    ///
    /// The write is unconditional: whatever was stored is replaced.
    ///
    /// # Arguments
    ///
    /// * `id` - The item to update
    /// * `votes` - The new net tally
    /// * `voted_by` - The new voter record
    async fn update_vote_fields(
        &self,
        id: ItemId,
        votes: i64,
        voted_by: &[VoteEntry],
    ) -> Result<(), ItemStoreError>;

    /// Overwrites the vote fields only if they still equal `expected`.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The stored state matched and was replaced
    /// * `Ok(false)` - The stored state changed since it was read; nothing was written
    /// * `Err(ItemStoreError)` - The store could not be written
    async fn update_vote_fields_if_unchanged(
        &self,
        id: ItemId,
        expected: &VoteState,
        votes: i64,
        voted_by: &[VoteEntry],
    ) -> Result<bool, ItemStoreError>;
}
