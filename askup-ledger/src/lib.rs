//! # Askup Ledger
//! This crate records, toggles and tallies per-user votes on questions and
//! answers. It depends only on the `ItemStore` abstraction from the repository
//! crate and never reads ambient session state: the acting user is always an
//! explicit argument.
pub mod errors;
pub mod ledger;

pub use errors::LedgerError;
pub use ledger::{VoteLedger, VoteMode, VoteOutcome, apply_vote};
