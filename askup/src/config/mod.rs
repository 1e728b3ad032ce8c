//! Configuration module for the askup service.
//! Reads settings from the environment and wires up application dependencies.
mod dependencies;
mod settings;

pub use dependencies::Dependencies;
pub use settings::{ConnectionMode, Settings, StorageBackend};
