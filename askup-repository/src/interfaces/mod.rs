//! This module defines and re-exports the interfaces for the askup repository.
//! It serves as a central point for accessing traits related to data interaction.
mod answers;
mod item_store;
mod questions;
mod users;

pub use answers::AnswerRepository;
pub use item_store::ItemStore;
pub use questions::QuestionRepository;
pub use users::UserRepository;
