//! # Askup
//! HTTP service for a question-and-answer forum. Users post questions and
//! answers and vote on both; votes are recorded through the ledger crate and
//! content is persisted through the repository crate.
pub mod config;
pub mod errors;
pub mod server;

pub use config::{Dependencies, Settings};
pub use errors::{ApiError, StartupError};
pub use server::{AppState, create_app, run_server};
