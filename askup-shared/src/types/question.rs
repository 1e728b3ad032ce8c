use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ItemId, UserId, VoteEntry};

/// A question posted to the forum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    pub id: ItemId,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub voted_by: Vec<VoteEntry>,
}

/// Input for creating a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub user_id: UserId,
}

impl NewQuestion {
    /// Builds a question from the raw comma-separated tag list.
    ///
    /// Tags are trimmed and empty entries dropped.
    pub fn new(title: String, content: String, raw_tags: &str, user_id: UserId) -> Self {
        let tags = raw_tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            title,
            content,
            tags,
            user_id,
        }
    }

    /// Materializes the question with a fresh id, zero votes and no voters.
    pub fn into_question(self, id: ItemId, created_at: DateTime<Utc>) -> Question {
        Question {
            id,
            title: self.title,
            content: self.content,
            tags: self.tags,
            user_id: self.user_id,
            created_at,
            votes: 0,
            voted_by: Vec::new(),
        }
    }
}
