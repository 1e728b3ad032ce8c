//! In-memory implementation of the askup repository.
//!
//! Backs every repository trait with maps guarded by `tokio::sync::RwLock`.
//! Used by tests and by local runs with `STORAGE_BACKEND=memory`. Reads and
//! writes take the lock separately, so a vote's read-modify-write is no more
//! atomic here than against Postgres.
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use askup_shared::types::{
    Answer, ItemId, ItemKind, NewAnswer, NewQuestion, NewUser, Question, User, UserCredentials,
    UserId, VotableItem, VoteEntry, VoteState,
};
use chrono::Utc;
use regex::RegexBuilder;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{AnswerRepository, ItemStore, ItemStoreError, QuestionRepository, UserRepository};

/// Shared in-memory forum data.
///
/// Cloning is cheap and every clone sees the same data.
#[derive(Clone, Default)]
pub struct InMemoryForum {
    questions: Arc<RwLock<HashMap<ItemId, Question>>>,
    answers: Arc<RwLock<HashMap<ItemId, Answer>>>,
    users: Arc<RwLock<HashMap<UserId, UserCredentials>>>,
}

impl InMemoryForum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an `ItemStore` over this forum's questions or answers.
    pub fn item_store(&self, kind: ItemKind) -> InMemoryItemStore {
        InMemoryItemStore {
            forum: self.clone(),
            kind,
        }
    }
}

fn newest_first<T>(items: &mut [T], created_at: impl Fn(&T) -> chrono::DateTime<Utc>) {
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
}

#[async_trait]
impl QuestionRepository for InMemoryForum {
    async fn insert_question(&self, question: NewQuestion) -> Result<Question, ItemStoreError> {
        let question = question.into_question(Uuid::new_v4(), Utc::now());
        self.questions
            .write()
            .await
            .insert(question.id, question.clone());
        Ok(question)
    }

    async fn find_question(&self, id: ItemId) -> Result<Option<Question>, ItemStoreError> {
        Ok(self.questions.read().await.get(&id).cloned())
    }

    async fn recent_questions(&self, limit: usize) -> Result<Vec<Question>, ItemStoreError> {
        let mut questions: Vec<Question> = self.questions.read().await.values().cloned().collect();
        newest_first(&mut questions, |q| q.created_at);
        questions.truncate(limit);
        Ok(questions)
    }

    async fn search_questions(&self, query: &str) -> Result<Vec<Question>, ItemStoreError> {
        let pattern = RegexBuilder::new(query).case_insensitive(true).build()?;

        let mut questions: Vec<Question> = self
            .questions
            .read()
            .await
            .values()
            .filter(|q| {
                pattern.is_match(&q.title)
                    || pattern.is_match(&q.content)
                    || q.tags.iter().any(|tag| tag == query)
            })
            .cloned()
            .collect();
        newest_first(&mut questions, |q| q.created_at);
        Ok(questions)
    }

    async fn questions_by_user(&self, user_id: UserId) -> Result<Vec<Question>, ItemStoreError> {
        let mut questions: Vec<Question> = self
            .questions
            .read()
            .await
            .values()
            .filter(|q| q.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut questions, |q| q.created_at);
        Ok(questions)
    }
}

#[async_trait]
impl AnswerRepository for InMemoryForum {
    async fn insert_answer(&self, answer: NewAnswer) -> Result<Answer, ItemStoreError> {
        let answer = answer.into_answer(Uuid::new_v4(), Utc::now());
        self.answers.write().await.insert(answer.id, answer.clone());
        Ok(answer)
    }

    async fn answers_for_question(&self, question_id: ItemId) -> Result<Vec<Answer>, ItemStoreError> {
        let mut answers: Vec<Answer> = self
            .answers
            .read()
            .await
            .values()
            .filter(|a| a.question_id == question_id)
            .cloned()
            .collect();
        answers.sort_by(|a, b| b.votes.cmp(&a.votes));
        Ok(answers)
    }

    async fn count_answers(&self, question_id: ItemId) -> Result<i64, ItemStoreError> {
        let count = self
            .answers
            .read()
            .await
            .values()
            .filter(|a| a.question_id == question_id)
            .count();
        Ok(count as i64)
    }

    async fn answers_by_user(&self, user_id: UserId) -> Result<Vec<Answer>, ItemStoreError> {
        let mut answers: Vec<Answer> = self
            .answers
            .read()
            .await
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        newest_first(&mut answers, |a| a.created_at);
        Ok(answers)
    }
}

#[async_trait]
impl UserRepository for InMemoryForum {
    async fn insert_user(&self, user: NewUser) -> Result<User, ItemStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|c| c.user.username == user.username || c.user.email == user.email)
        {
            return Err(ItemStoreError::duplicate(format!(
                "username {} or email {} already registered",
                user.username, user.email
            )));
        }

        let credentials = user.into_credentials(Uuid::new_v4(), Utc::now());
        let user = credentials.user.clone();
        users.insert(user.id, credentials);
        Ok(user)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, ItemStoreError> {
        Ok(self.users.read().await.get(&id).map(|c| c.user.clone()))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, ItemStoreError> {
        Ok(self
            .find_credentials(username)
            .await?
            .map(|credentials| credentials.user))
    }

    async fn find_credentials(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, ItemStoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|c| c.user.username == username)
            .cloned())
    }
}

/// `ItemStore` view over the questions or the answers of an `InMemoryForum`.
#[derive(Clone)]
pub struct InMemoryItemStore {
    forum: InMemoryForum,
    kind: ItemKind,
}

impl InMemoryItemStore {
    async fn read_state(&self, id: ItemId) -> Option<VoteState> {
        match self.kind {
            ItemKind::Question => self.forum.questions.read().await.get(&id).map(|q| VoteState {
                votes: q.votes,
                voted_by: q.voted_by.clone(),
            }),
            ItemKind::Answer => self.forum.answers.read().await.get(&id).map(|a| VoteState {
                votes: a.votes,
                voted_by: a.voted_by.clone(),
            }),
        }
    }

    /// Applies the update under a single write lock; `expected` turns it into
    /// a compare-and-set. Returns whether a matching item was written.
    async fn write_state(
        &self,
        id: ItemId,
        expected: Option<&VoteState>,
        votes: i64,
        voted_by: &[VoteEntry],
    ) -> bool {
        fn apply(
            current_votes: &mut i64,
            current_voted_by: &mut Vec<VoteEntry>,
            expected: Option<&VoteState>,
            votes: i64,
            voted_by: &[VoteEntry],
        ) -> bool {
            if let Some(expected) = expected {
                if *current_votes != expected.votes || *current_voted_by != expected.voted_by {
                    return false;
                }
            }
            *current_votes = votes;
            *current_voted_by = voted_by.to_vec();
            true
        }

        match self.kind {
            ItemKind::Question => match self.forum.questions.write().await.get_mut(&id) {
                Some(q) => apply(&mut q.votes, &mut q.voted_by, expected, votes, voted_by),
                None => false,
            },
            ItemKind::Answer => match self.forum.answers.write().await.get_mut(&id) {
                Some(a) => apply(&mut a.votes, &mut a.voted_by, expected, votes, voted_by),
                None => false,
            },
        }
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn find_by_id(&self, id: ItemId) -> Result<Option<VotableItem>, ItemStoreError> {
        Ok(self
            .read_state(id)
            .await
            .map(|state| VotableItem::new(id, self.kind, state.votes, state.voted_by)))
    }

    async fn update_vote_fields(
        &self,
        id: ItemId,
        votes: i64,
        voted_by: &[VoteEntry],
    ) -> Result<(), ItemStoreError> {
        // A missing item is a no-op, like an update matching no document.
        self.write_state(id, None, votes, voted_by).await;
        Ok(())
    }

    async fn update_vote_fields_if_unchanged(
        &self,
        id: ItemId,
        expected: &VoteState,
        votes: i64,
        voted_by: &[VoteEntry],
    ) -> Result<bool, ItemStoreError> {
        Ok(self.write_state(id, Some(expected), votes, voted_by).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askup_shared::types::VoteDirection;
    use std::time::Duration;

    fn new_question(title: &str, content: &str, tags: &str, user_id: UserId) -> NewQuestion {
        NewQuestion::new(title.to_string(), content.to_string(), tags, user_id)
    }

    #[tokio::test]
    async fn test_insert_question_starts_with_zero_votes() {
        let forum = InMemoryForum::new();
        let question = forum
            .insert_question(new_question("Title", "Body", "rust", Uuid::new_v4()))
            .await
            .unwrap();

        let item = forum
            .item_store(ItemKind::Question)
            .find_by_id(question.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.state.votes, 0);
        assert!(item.state.voted_by.is_empty());
        assert_eq!(item.kind, ItemKind::Question);
    }

    #[tokio::test]
    async fn test_recent_questions_newest_first_and_limited() {
        let forum = InMemoryForum::new();
        let user = Uuid::new_v4();
        for i in 0..3 {
            forum
                .insert_question(new_question(&format!("q{i}"), "body", "", user))
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let recent = forum.recent_questions(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].title, "q2");
        assert_eq!(recent[1].title, "q1");
    }

    #[tokio::test]
    async fn test_search_matches_title_content_and_exact_tag() {
        let forum = InMemoryForum::new();
        let user = Uuid::new_v4();
        forum
            .insert_question(new_question("Async Traits", "how?", "", user))
            .await
            .unwrap();
        forum
            .insert_question(new_question("Other", "about ASYNC runtimes", "", user))
            .await
            .unwrap();
        forum
            .insert_question(new_question("Tagged", "nothing", "tokio", user))
            .await
            .unwrap();
        forum
            .insert_question(new_question("Unrelated", "nothing", "tokio-util", user))
            .await
            .unwrap();

        let found = forum.search_questions("async").await.unwrap();
        assert_eq!(found.len(), 2);

        let found = forum.search_questions("tokio").await.unwrap();
        let titles: Vec<&str> = found.iter().map(|q| q.title.as_str()).collect();
        assert_eq!(titles, vec!["Tagged"]);
    }

    #[tokio::test]
    async fn test_search_invalid_pattern_is_an_error() {
        let forum = InMemoryForum::new();
        let result = forum.search_questions("(unclosed").await;
        assert!(matches!(result, Err(ItemStoreError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_answers_for_question_sorted_by_votes() {
        let forum = InMemoryForum::new();
        let question_id = Uuid::new_v4();
        let user = Uuid::new_v4();
        let low = forum
            .insert_answer(NewAnswer { content: "low".to_string(), question_id, user_id: user })
            .await
            .unwrap();
        let high = forum
            .insert_answer(NewAnswer { content: "high".to_string(), question_id, user_id: user })
            .await
            .unwrap();
        forum
            .insert_answer(NewAnswer {
                content: "elsewhere".to_string(),
                question_id: Uuid::new_v4(),
                user_id: user,
            })
            .await
            .unwrap();

        let store = forum.item_store(ItemKind::Answer);
        store
            .update_vote_fields(high.id, 3, &[VoteEntry::new(user, VoteDirection::Up)])
            .await
            .unwrap();
        store.update_vote_fields(low.id, -1, &[]).await.unwrap();

        let answers = forum.answers_for_question(question_id).await.unwrap();
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].id, high.id);
        assert_eq!(answers[1].id, low.id);
        assert_eq!(forum.count_answers(question_id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_item_stores_are_kind_specific() {
        let forum = InMemoryForum::new();
        let question = forum
            .insert_question(new_question("t", "c", "", Uuid::new_v4()))
            .await
            .unwrap();

        let answers = forum.item_store(ItemKind::Answer);
        assert!(answers.find_by_id(question.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_conditional_update_rejects_stale_state() {
        let forum = InMemoryForum::new();
        let user = Uuid::new_v4();
        let question = forum
            .insert_question(new_question("t", "c", "", user))
            .await
            .unwrap();
        let store = forum.item_store(ItemKind::Question);
        let entry = [VoteEntry::new(user, VoteDirection::Up)];

        let stale = VoteState { votes: 5, voted_by: Vec::new() };
        assert!(!store
            .update_vote_fields_if_unchanged(question.id, &stale, 1, &entry)
            .await
            .unwrap());

        let fresh = VoteState::default();
        assert!(store
            .update_vote_fields_if_unchanged(question.id, &fresh, 1, &entry)
            .await
            .unwrap());

        let item = store.find_by_id(question.id).await.unwrap().unwrap();
        assert_eq!(item.state.votes, 1);
        assert_eq!(item.state.voted_by, entry.to_vec());
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_user_lookup() {
        let forum = InMemoryForum::new();
        let user = forum
            .insert_user(new_user("ferris", "ferris@example.com"))
            .await
            .unwrap();

        assert_eq!(forum.find_user(user.id).await.unwrap(), Some(user.clone()));
        assert_eq!(forum.find_user_by_username("ferris").await.unwrap(), Some(user.clone()));
        assert!(forum.find_user_by_username("nobody").await.unwrap().is_none());

        let credentials = forum.find_credentials("ferris").await.unwrap().unwrap();
        assert_eq!(credentials.user, user);
        assert_eq!(credentials.password_hash, "hash");
    }

    #[tokio::test]
    async fn test_insert_user_rejects_taken_username_or_email() {
        let forum = InMemoryForum::new();
        forum
            .insert_user(new_user("ferris", "ferris@example.com"))
            .await
            .unwrap();

        let same_name = forum.insert_user(new_user("ferris", "other@example.com")).await;
        assert!(matches!(same_name, Err(ItemStoreError::Duplicate(_))));

        let same_email = forum.insert_user(new_user("crab", "ferris@example.com")).await;
        assert!(matches!(same_email, Err(ItemStoreError::Duplicate(_))));

        assert!(forum.find_user_by_username("crab").await.unwrap().is_none());
    }
}
