//! Environment-driven settings.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use askup_ledger::VoteMode;
use axum::http::HeaderName;
use tracing::warn;

use crate::errors::StartupError;

/// Default listen host.
const DEFAULT_SERVER_HOST: [u8; 4] = [127, 0, 0, 1];

/// Default listen port.
const DEFAULT_SERVER_PORT: u16 = 8080;

/// Header the upstream session layer uses to forward the authenticated user.
const DEFAULT_SESSION_USER_HEADER: &str = "x-askup-user";

/// Number of questions on the front page.
const DEFAULT_RECENT_QUESTIONS_LIMIT: usize = 20;

/// Default connection retry interval in seconds.
const DEFAULT_RETRY_INTERVAL_SECS: u64 = 15;

/// Where forum data lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process-local maps; data is lost on restart.
    Memory,
}

impl StorageBackend {
    /// Parse the backend from `STORAGE_BACKEND`.
    ///
    /// Valid values: "postgres" or "memory" (case-insensitive).
    /// Defaults to "postgres" if not set or invalid.
    fn from_env() -> Self {
        match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => Self::Postgres,
            "memory" | "in-memory" => Self::Memory,
            _ => {
                warn!("Invalid STORAGE_BACKEND, defaulting to 'postgres'");
                Self::Postgres
            }
        }
    }
}

/// Connection mode for PostgreSQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    /// Fail immediately if connection fails.
    FailFast,
    /// Retry connection at a fixed interval until successful.
    Retry,
}

impl ConnectionMode {
    /// Parse connection mode from `DB_CONNECTION_MODE`.
    ///
    /// Valid values: "fail-fast" or "retry" (case-insensitive).
    /// Defaults to "retry" if not set or invalid.
    fn from_env() -> Self {
        match env::var("DB_CONNECTION_MODE")
            .unwrap_or_else(|_| "retry".to_string())
            .to_lowercase()
            .as_str()
        {
            "fail-fast" | "failfast" | "fail_fast" => Self::FailFast,
            "retry" => Self::Retry,
            _ => {
                warn!("Invalid DB_CONNECTION_MODE, defaulting to 'retry'");
                Self::Retry
            }
        }
    }
}

fn vote_mode_from_env() -> VoteMode {
    match env::var("VOTE_MODE") {
        Ok(value) => VoteMode::parse(&value).unwrap_or_else(|| {
            warn!(vote_mode = %value, "Invalid VOTE_MODE, defaulting to 'baseline'");
            VoteMode::Baseline
        }),
        Err(_) => VoteMode::Baseline,
    }
}

/// Reads an optional variable and parses it, failing on malformed values.
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, StartupError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| StartupError::config(format!("{name} has an invalid value: {raw}"))),
        Err(_) => Ok(default),
    }
}

/// Service settings, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub storage_backend: StorageBackend,
    /// Required when `storage_backend` is `Postgres`.
    pub database_url: Option<String>,
    pub connection_mode: ConnectionMode,
    pub retry_interval: Duration,
    pub run_migrations: bool,
    pub vote_mode: VoteMode,
    pub server_addr: SocketAddr,
    pub session_user_header: HeaderName,
    pub recent_questions_limit: usize,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STORAGE_BACKEND`: "postgres" or "memory" (default: postgres)
    /// - `DATABASE_URL`: PostgreSQL connection string (required for postgres)
    /// - `DB_CONNECTION_MODE`: "fail-fast" or "retry" (default: retry)
    /// - `DB_RETRY_INTERVAL_SECS`: Retry interval in seconds (default: 15)
    /// - `RUN_MIGRATIONS`: Apply schema migrations on startup (default: true)
    /// - `VOTE_MODE`: "baseline" or "atomic" (default: baseline)
    /// - `SERVER_HOST` / `SERVER_PORT`: Listen address (default: 127.0.0.1:8080)
    /// - `SESSION_USER_HEADER`: Header carrying the authenticated user id (default: x-askup-user)
    /// - `RECENT_QUESTIONS_LIMIT`: Front page size (default: 20)
    pub fn from_env() -> Result<Self, StartupError> {
        let storage_backend = StorageBackend::from_env();
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        if storage_backend == StorageBackend::Postgres && database_url.is_none() {
            return Err(StartupError::config(
                "DATABASE_URL must be set when STORAGE_BACKEND is postgres",
            ));
        }

        let host: IpAddr = parse_var("SERVER_HOST", IpAddr::from(DEFAULT_SERVER_HOST))?;
        let port: u16 = parse_var("SERVER_PORT", DEFAULT_SERVER_PORT)?;

        let header = env::var("SESSION_USER_HEADER")
            .unwrap_or_else(|_| DEFAULT_SESSION_USER_HEADER.to_string());
        let session_user_header = HeaderName::from_bytes(header.to_lowercase().as_bytes())
            .map_err(|_| {
                StartupError::config(format!("SESSION_USER_HEADER is not a valid header name: {header}"))
            })?;

        Ok(Self {
            storage_backend,
            database_url,
            connection_mode: ConnectionMode::from_env(),
            retry_interval: Duration::from_secs(parse_var(
                "DB_RETRY_INTERVAL_SECS",
                DEFAULT_RETRY_INTERVAL_SECS,
            )?),
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
            vote_mode: vote_mode_from_env(),
            server_addr: SocketAddr::new(host, port),
            session_user_header,
            recent_questions_limit: parse_var(
                "RECENT_QUESTIONS_LIMIT",
                DEFAULT_RECENT_QUESTIONS_LIMIT,
            )?,
        })
    }
}
