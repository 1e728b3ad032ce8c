//! Error types for the vote ledger.
use askup_repository::ItemStoreError;
use askup_shared::types::ItemId;
use thiserror::Error;

/// Represents errors that can occur while casting a vote.
///
/// Every variant is terminal for the request: the ledger never retries.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The item does not exist. Nothing was written.
    #[error("Item not found: {0}")]
    NotFound(ItemId),

    /// The store failed to read or write the item.
    #[error("Persistence failure: {0}")]
    Persistence(#[from] ItemStoreError),

    /// Atomic mode only: the item's vote fields changed between read and write.
    #[error("Concurrent vote on item {0}")]
    Conflict(ItemId),
}
