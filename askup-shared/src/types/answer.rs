use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ItemId, UserId, VoteEntry};

/// An answer to a question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Answer {
    pub id: ItemId,
    pub content: String,
    pub question_id: ItemId,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub voted_by: Vec<VoteEntry>,
}

/// Input for creating an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAnswer {
    pub content: String,
    pub question_id: ItemId,
    pub user_id: UserId,
}

impl NewAnswer {
    pub fn into_answer(self, id: ItemId, created_at: DateTime<Utc>) -> Answer {
        Answer {
            id,
            content: self.content,
            question_id: self.question_id,
            user_id: self.user_id,
            created_at,
            votes: 0,
            voted_by: Vec::new(),
        }
    }
}
