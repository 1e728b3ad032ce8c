//! Error types for the askup repository.
mod item_store;

pub use item_store::ItemStoreError;
