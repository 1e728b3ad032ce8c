//! Row types decoded from the forum tables.
use askup_shared::types::{Answer, Question, User, UserCredentials, VoteEntry};
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub(crate) struct QuestionRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub voted_by: Json<Vec<VoteEntry>>,
}

impl From<QuestionRow> for Question {
    fn from(row: QuestionRow) -> Self {
        Question {
            id: row.id,
            title: row.title,
            content: row.content,
            tags: row.tags,
            user_id: row.user_id,
            created_at: row.created_at,
            votes: row.votes,
            voted_by: row.voted_by.0,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct AnswerRow {
    pub id: Uuid,
    pub content: String,
    pub question_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub votes: i64,
    pub voted_by: Json<Vec<VoteEntry>>,
}

impl From<AnswerRow> for Answer {
    fn from(row: AnswerRow) -> Self {
        Answer {
            id: row.id,
            content: row.content,
            question_id: row.question_id,
            user_id: row.user_id,
            created_at: row.created_at,
            votes: row.votes,
            voted_by: row.voted_by.0,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct CredentialsRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub password_hash: String,
}

impl From<CredentialsRow> for UserCredentials {
    fn from(row: CredentialsRow) -> Self {
        UserCredentials {
            user: User {
                id: row.id,
                username: row.username,
                email: row.email,
                created_at: row.created_at,
            },
            password_hash: row.password_hash,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct VoteFieldsRow {
    pub votes: i64,
    pub voted_by: Json<Vec<VoteEntry>>,
}
