//! Workforce Server: employee, leave, and payroll management.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use workforce_api::AppState;
use workforce_core::config::{AppConfig, DatabaseProvider};
use workforce_core::error::AppError;
use workforce_database::connection::mask_password;
use workforce_database::{DatabasePool, MemoryStore, Repositories};

#[tokio::main]
async fn main() {
    let env = AppConfig::active_env();
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Workforce v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Persistence ──────────────────────────────────────
    let (repos, db) = match config.database.provider {
        DatabaseProvider::Postgres => {
            tracing::info!(url = %mask_password(&config.database.url), "Connecting to database...");
            let db = DatabasePool::connect(&config.database).await?;

            if config.database.auto_migrate {
                workforce_database::migration::run_migrations(db.pool()).await?;
            } else {
                tracing::info!("Automatic migrations disabled");
            }
            (Repositories::postgres(db.pool().clone()), Some(db))
        }
        DatabaseProvider::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            (Repositories::memory(Arc::new(MemoryStore::new())), None)
        }
    };

    // ── Step 2: Auth + services ──────────────────────────────────
    tracing::info!("Initializing services...");
    let state = AppState::new(config, repos)?;

    // ── Step 3: HTTP server ──────────────────────────────────────
    let result = workforce_api::serve(state).await;

    if let Some(db) = db {
        db.close().await;
    }
    result
}
