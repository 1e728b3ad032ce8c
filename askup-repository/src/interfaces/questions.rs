use askup_shared::types::{ItemId, NewQuestion, Question, UserId};
use crate::errors::ItemStoreError;

/// Trait for creating and listing questions.
#[async_trait::async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persists a new question with zero votes and an empty voter record.
    async fn insert_question(&self, question: NewQuestion) -> Result<Question, ItemStoreError>;

    async fn find_question(&self, id: ItemId) -> Result<Option<Question>, ItemStoreError>;

    /// Returns at most `limit` questions, newest first.
    async fn recent_questions(&self, limit: usize) -> Result<Vec<Question>, ItemStoreError>;

    /// Case-insensitive regular expression match on title or content, or
    /// exact membership of `query` in the tags. Newest first.
    async fn search_questions(&self, query: &str) -> Result<Vec<Question>, ItemStoreError>;

    /// All questions asked by a user, newest first.
    async fn questions_by_user(&self, user_id: UserId) -> Result<Vec<Question>, ItemStoreError>;
}
