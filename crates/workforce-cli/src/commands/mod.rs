//! CLI command definitions and dispatch.

pub mod account;
pub mod admin;
pub mod migrate;

use clap::{Parser, Subcommand};

use workforce_core::config::AppConfig;
use workforce_core::error::AppError;
use workforce_database::DatabasePool;

use crate::output::OutputFormat;

/// Workforce: employee and leave management
#[derive(Debug, Parser)]
#[command(name = "workforce", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding `default.toml` and environment overlays
    #[arg(short, long, default_value = "config")]
    pub config_dir: String,

    /// Environment overlay to load (defaults to WORKFORCE_ENV)
    #[arg(short, long)]
    pub env: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Admin account management
    Admin(admin::AdminArgs),
    /// Account listing
    Account(account::AccountArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        let db = DatabasePool::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &db, self.format).await,
            Commands::Admin(args) => admin::execute(args, &config, &db).await,
            Commands::Account(args) => account::execute(args, &db, self.format).await,
        };

        db.close().await;
        result
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        let env = self.env.clone().unwrap_or_else(AppConfig::active_env);
        AppConfig::load_from(&self.config_dir, &env)
    }
}
