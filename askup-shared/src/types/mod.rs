mod answer;
mod item_kind;
mod question;
mod user;
mod votable_item;
mod vote_direction;
mod vote_entry;

pub use answer::{Answer, NewAnswer};
pub use item_kind::ItemKind;
pub use question::{NewQuestion, Question};
pub use user::{NewUser, User, UserCredentials};
pub use votable_item::{VotableItem, VoteState};
pub use vote_direction::VoteDirection;
pub use vote_entry::VoteEntry;

/// Identifier of a question or an answer.
pub type ItemId = uuid::Uuid;

/// Identifier of a registered user.
pub type UserId = uuid::Uuid;
