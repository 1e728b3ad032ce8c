//! Dependency initialization and wiring for the askup service.

use std::time::Duration;

use askup_repository::InMemoryForum;
use sqlx::PgPool;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::{ConnectionMode, Settings, StorageBackend};
use crate::errors::StartupError;
use crate::server::AppState;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Handler state ready to be mounted on the router.
    pub state: AppState,
}

impl Dependencies {
    /// Initialize all dependencies from loaded settings.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(StartupError)` - If the database is unreachable (fail-fast mode) or migrations fail
    pub async fn new(settings: &Settings) -> Result<Self, StartupError> {
        info!(
            storage_backend = ?settings.storage_backend,
            vote_mode = ?settings.vote_mode,
            connection_mode = ?settings.connection_mode,
            server_addr = %settings.server_addr,
            "Initializing dependencies"
        );

        let state = match settings.storage_backend {
            StorageBackend::Memory => {
                warn!("Using in-memory storage, data will not survive a restart");
                AppState::in_memory(InMemoryForum::new(), settings.vote_mode)
            }
            StorageBackend::Postgres => {
                let database_url = settings.database_url.as_deref().ok_or_else(|| {
                    StartupError::config("DATABASE_URL must be set when STORAGE_BACKEND is postgres")
                })?;

                let pool = Self::connect_to_postgres(
                    database_url,
                    settings.connection_mode,
                    settings.retry_interval,
                )
                .await?;
                info!("PostgreSQL connection established");

                if settings.run_migrations {
                    askup_repository::postgres::run_migrations(&pool).await?;
                    info!("Database migrations applied");
                }

                AppState::postgres(pool, settings.vote_mode)
            }
        };

        Ok(Self {
            state: state
                .with_session_user_header(settings.session_user_header.clone())
                .with_recent_questions_limit(settings.recent_questions_limit),
        })
    }

    /// Connect to PostgreSQL with retry logic based on connection mode.
    async fn connect_to_postgres(
        url: &str,
        mode: ConnectionMode,
        retry_interval: Duration,
    ) -> Result<PgPool, StartupError> {
        loop {
            match PgPool::connect(url).await {
                Ok(pool) => return Ok(pool),
                Err(e) => match mode {
                    ConnectionMode::FailFast => return Err(StartupError::Database(e)),
                    ConnectionMode::Retry => {
                        warn!(
                            error = %e,
                            retry_interval_secs = retry_interval.as_secs(),
                            "Failed to connect to PostgreSQL, retrying..."
                        );
                        sleep(retry_interval).await;
                    }
                },
            }
        }
    }
}
