//! # Askup Repository
//! This crate provides traits and implementations for reading and writing
//! forum data: questions, answers, users and the vote fields of votable items.
//! It includes definitions for errors, interfaces, a PostgreSQL backend and an
//! in-memory backend.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::ItemStoreError;
pub use interfaces::{AnswerRepository, ItemStore, QuestionRepository, UserRepository};
pub use memory::{InMemoryForum, InMemoryItemStore};
pub use postgres::{PostgresForumRepository, PostgresItemStore};
