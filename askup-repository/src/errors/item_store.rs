//! Error types shared by every store in the repository.
use thiserror::Error;

/// Represents errors that can occur while reading or writing forum data.
///
/// This enum consolidates backend failures (SQLx errors, unreachable stores)
/// and data errors such as undecodable vote records, invalid search patterns
/// or unique-field violations.
#[derive(Debug, Error)]
pub enum ItemStoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A unique field (username or email) is already taken.
    #[error("Duplicate record: {0}")]
    Duplicate(String),
}

impl ItemStoreError {
    /// Create an invalid query error.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create a duplicate record error.
    pub fn duplicate(msg: impl Into<String>) -> Self {
        Self::Duplicate(msg.into())
    }

    /// Create a store unavailable error.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

impl From<regex::Error> for ItemStoreError {
    fn from(err: regex::Error) -> Self {
        Self::InvalidQuery(err.to_string())
    }
}
