//! Response bodies returned by the handlers.
use askup_shared::types::{Answer, Question, User, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Shown when a question's or answer's author no longer exists.
pub const ANONYMOUS: &str = "Anonymous";

/// Shown when an answer's question no longer exists.
pub const UNKNOWN_QUESTION: &str = "Unknown Question";

/// A question in a listing, with its author and answer count.
#[derive(Debug, Serialize)]
pub struct QuestionSummary {
    #[serde(flatten)]
    pub question: Question,
    pub username: String,
    pub answer_count: i64,
}

#[derive(Debug, Serialize)]
pub struct QuestionList {
    pub questions: Vec<QuestionSummary>,
}

#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub query: String,
    pub questions: Vec<QuestionSummary>,
}

#[derive(Debug, Serialize)]
pub struct QuestionWithAuthor {
    #[serde(flatten)]
    pub question: Question,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct AnswerWithAuthor {
    #[serde(flatten)]
    pub answer: Answer,
    pub username: String,
}

/// A question page: the question and its answers, highest tally first.
#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub question: QuestionWithAuthor,
    pub answers: Vec<AnswerWithAuthor>,
}

/// Returned by register and login; the session layer stores `user_id`.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub user_id: UserId,
    pub username: String,
}

impl From<User> for SessionUser {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoteTally {
    pub votes: i64,
}

#[derive(Debug, Serialize)]
pub struct ProfileUser {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for ProfileUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileAnswer {
    #[serde(flatten)]
    pub answer: Answer,
    pub question_title: String,
}

#[derive(Debug, Serialize)]
pub struct ProfilePage {
    pub user: ProfileUser,
    pub questions: Vec<Question>,
    pub answers: Vec<ProfileAnswer>,
}
