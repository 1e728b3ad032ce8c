//! Shared state handed to every handler.
use std::sync::Arc;

use askup_ledger::{VoteLedger, VoteMode};
use askup_repository::{
    AnswerRepository, InMemoryForum, PostgresForumRepository, PostgresItemStore,
    QuestionRepository, UserRepository,
};
use askup_shared::types::ItemKind;
use axum::http::HeaderName;

const DEFAULT_SESSION_USER_HEADER: &str = "x-askup-user";
const DEFAULT_RECENT_QUESTIONS_LIMIT: usize = 20;

#[derive(Clone)]
pub struct AppState {
    pub questions: Arc<dyn QuestionRepository>,
    pub answers: Arc<dyn AnswerRepository>,
    pub users: Arc<dyn UserRepository>,
    pub question_votes: Arc<VoteLedger>,
    pub answer_votes: Arc<VoteLedger>,
    pub session_user_header: HeaderName,
    pub recent_questions_limit: usize,
}

impl AppState {
    /// State backed by PostgreSQL.
    pub fn postgres(pool: sqlx::PgPool, vote_mode: VoteMode) -> Self {
        let repository = Arc::new(PostgresForumRepository::new(pool.clone()));
        let question_store = Arc::new(PostgresItemStore::new(pool.clone(), ItemKind::Question));
        let answer_store = Arc::new(PostgresItemStore::new(pool, ItemKind::Answer));

        Self {
            questions: repository.clone(),
            answers: repository.clone(),
            users: repository,
            question_votes: Arc::new(VoteLedger::with_mode(question_store, vote_mode)),
            answer_votes: Arc::new(VoteLedger::with_mode(answer_store, vote_mode)),
            session_user_header: HeaderName::from_static(DEFAULT_SESSION_USER_HEADER),
            recent_questions_limit: DEFAULT_RECENT_QUESTIONS_LIMIT,
        }
    }

    /// State backed by an in-memory forum.
    pub fn in_memory(forum: InMemoryForum, vote_mode: VoteMode) -> Self {
        let question_store = Arc::new(forum.item_store(ItemKind::Question));
        let answer_store = Arc::new(forum.item_store(ItemKind::Answer));
        let forum = Arc::new(forum);

        Self {
            questions: forum.clone(),
            answers: forum.clone(),
            users: forum,
            question_votes: Arc::new(VoteLedger::with_mode(question_store, vote_mode)),
            answer_votes: Arc::new(VoteLedger::with_mode(answer_store, vote_mode)),
            session_user_header: HeaderName::from_static(DEFAULT_SESSION_USER_HEADER),
            recent_questions_limit: DEFAULT_RECENT_QUESTIONS_LIMIT,
        }
    }

    pub fn with_session_user_header(mut self, header: HeaderName) -> Self {
        self.session_user_header = header;
        self
    }

    pub fn with_recent_questions_limit(mut self, limit: usize) -> Self {
        self.recent_questions_limit = limit;
        self
    }

    /// The ledger for the store selected by the item kind.
    pub fn ledger(&self, kind: ItemKind) -> &VoteLedger {
        match kind {
            ItemKind::Question => &self.question_votes,
            ItemKind::Answer => &self.answer_votes,
        }
    }
}
