//! Askup service entry point.

use std::env;

use askup::{Dependencies, Settings, StartupError, create_app, run_server};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("askup=info,askup_ledger=info,askup_repository=info")
    });

    let json_output = env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();
    }

    info!(
        service_name = "askup",
        service_version = env!("CARGO_PKG_VERSION"),
        json_output,
        "Tracing initialized"
    );
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenv().ok();
    init_tracing();

    info!("Starting askup");

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e);
        }
    };

    let deps = match Dependencies::new(&settings).await {
        Ok(deps) => {
            info!("Dependencies initialized successfully");
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let app = create_app(deps.state);
    if let Err(e) = run_server(app, settings.server_addr).await {
        error!(error = %e, "Server error");
        return Err(e);
    }

    Ok(())
}
