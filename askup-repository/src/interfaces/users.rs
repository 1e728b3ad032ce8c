use askup_shared::types::{NewUser, User, UserCredentials, UserId};
use crate::errors::ItemStoreError;

/// Storage for user accounts.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a user.
    ///
    /// Fails with `ItemStoreError::Duplicate` when the username or the email
    /// is already registered.
    async fn insert_user(&self, user: NewUser) -> Result<User, ItemStoreError>;

    async fn find_user(&self, id: UserId) -> Result<Option<User>, ItemStoreError>;
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, ItemStoreError>;

    /// The user and their password hash, for verifying a login.
    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, ItemStoreError>;
}
