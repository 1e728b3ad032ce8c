//! # Askup Shared
//! This crate defines the data structures shared across the askup workspace.
//! It includes votable items and their vote records, questions, answers and
//! users.
pub mod types;
