use askup_shared::types::{Answer, ItemId, NewAnswer, UserId};
use crate::errors::ItemStoreError;

/// Trait for creating and listing answers.
#[async_trait::async_trait]
pub trait AnswerRepository: Send + Sync {
    /// Persists a new answer with zero votes and an empty voter record.
    async fn insert_answer(&self, answer: NewAnswer) -> Result<Answer, ItemStoreError>;

    /// Answers to a question, highest tally first.
    async fn answers_for_question(&self, question_id: ItemId) -> Result<Vec<Answer>, ItemStoreError>;

    async fn count_answers(&self, question_id: ItemId) -> Result<i64, ItemStoreError>;

    /// All answers written by a user, newest first.
    async fn answers_by_user(&self, user_id: UserId) -> Result<Vec<Answer>, ItemStoreError>;
}
