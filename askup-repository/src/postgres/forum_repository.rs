use async_trait::async_trait;
use askup_shared::types::{
    Answer, ItemId, NewAnswer, NewQuestion, NewUser, Question, User, UserCredentials, UserId,
};
use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use super::rows::{AnswerRow, CredentialsRow, QuestionRow, UserRow};
use crate::{AnswerRepository, ItemStoreError, QuestionRepository, UserRepository};

const QUESTION_COLUMNS: &str = "id, title, content, tags, user_id, created_at, votes, voted_by";
const ANSWER_COLUMNS: &str = "id, content, question_id, user_id, created_at, votes, voted_by";
const USER_COLUMNS: &str = "id, username, email, created_at";

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL implementation of the question, answer and user repositories.
///
/// All queries run directly on the pool; every write touches a single row.
#[derive(Clone)]
pub struct PostgresForumRepository {
    pool: sqlx::PgPool,
}

impl PostgresForumRepository {
    /// Creates a new PostgreSQL forum repository.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with the forum schema applied
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PostgresForumRepository {
    async fn insert_question(&self, question: NewQuestion) -> Result<Question, ItemStoreError> {
        let question = question.into_question(Uuid::new_v4(), Utc::now());

        sqlx::query(
            r#"
            INSERT INTO questions (id, title, content, tags, user_id, created_at, votes, voted_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(question.id)
        .bind(&question.title)
        .bind(&question.content)
        .bind(&question.tags)
        .bind(question.user_id)
        .bind(question.created_at)
        .bind(question.votes)
        .bind(Json(&question.voted_by))
        .execute(&self.pool)
        .await?;

        Ok(question)
    }

    async fn find_question(&self, id: ItemId) -> Result<Option<Question>, ItemStoreError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions WHERE id = $1");
        let row: Option<QuestionRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Question::from))
    }

    async fn recent_questions(&self, limit: usize) -> Result<Vec<Question>, ItemStoreError> {
        let sql = format!("SELECT {QUESTION_COLUMNS} FROM questions ORDER BY created_at DESC LIMIT $1");
        let rows: Vec<QuestionRow> = sqlx::query_as(&sql)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn search_questions(&self, query: &str) -> Result<Vec<Question>, ItemStoreError> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions \
             WHERE title ~* $1 OR content ~* $1 OR $1 = ANY(tags) \
             ORDER BY created_at DESC"
        );
        let rows: Vec<QuestionRow> = sqlx::query_as(&sql)
            .bind(query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| match e {
                // 2201B: invalid_regular_expression
                sqlx::Error::Database(db) if db.code().as_deref() == Some("2201B") => {
                    ItemStoreError::invalid_query(db.message().to_string())
                }
                other => ItemStoreError::Database(other),
            })?;
        Ok(rows.into_iter().map(Question::from).collect())
    }

    async fn questions_by_user(&self, user_id: UserId) -> Result<Vec<Question>, ItemStoreError> {
        let sql = format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let rows: Vec<QuestionRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Question::from).collect())
    }
}

#[async_trait]
impl AnswerRepository for PostgresForumRepository {
    async fn insert_answer(&self, answer: NewAnswer) -> Result<Answer, ItemStoreError> {
        let answer = answer.into_answer(Uuid::new_v4(), Utc::now());

        sqlx::query(
            r#"
            INSERT INTO answers (id, content, question_id, user_id, created_at, votes, voted_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(answer.id)
        .bind(&answer.content)
        .bind(answer.question_id)
        .bind(answer.user_id)
        .bind(answer.created_at)
        .bind(answer.votes)
        .bind(Json(&answer.voted_by))
        .execute(&self.pool)
        .await?;

        Ok(answer)
    }

    async fn answers_for_question(&self, question_id: ItemId) -> Result<Vec<Answer>, ItemStoreError> {
        let sql = format!(
            "SELECT {ANSWER_COLUMNS} FROM answers WHERE question_id = $1 ORDER BY votes DESC"
        );
        let rows: Vec<AnswerRow> = sqlx::query_as(&sql)
            .bind(question_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Answer::from).collect())
    }

    async fn count_answers(&self, question_id: ItemId) -> Result<i64, ItemStoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM answers WHERE question_id = $1")
            .bind(question_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn answers_by_user(&self, user_id: UserId) -> Result<Vec<Answer>, ItemStoreError> {
        let sql = format!(
            "SELECT {ANSWER_COLUMNS} FROM answers WHERE user_id = $1 ORDER BY created_at DESC"
        );
        let rows: Vec<AnswerRow> = sqlx::query_as(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Answer::from).collect())
    }
}

#[async_trait]
impl UserRepository for PostgresForumRepository {
    async fn insert_user(&self, user: NewUser) -> Result<User, ItemStoreError> {
        let credentials = user.into_credentials(Uuid::new_v4(), Utc::now());

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(credentials.user.id)
        .bind(&credentials.user.username)
        .bind(&credentials.user.email)
        .bind(&credentials.password_hash)
        .bind(credentials.user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                ItemStoreError::duplicate(db.message().to_string())
            }
            other => ItemStoreError::Database(other),
        })?;

        Ok(credentials.user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, ItemStoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, ItemStoreError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = $1");
        let row: Option<UserRow> = sqlx::query_as(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(User::from))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, ItemStoreError> {
        let sql = format!("SELECT {USER_COLUMNS}, password_hash FROM users WHERE username = $1");
        let row: Option<CredentialsRow> = sqlx::query_as(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(UserCredentials::from))
    }
}
