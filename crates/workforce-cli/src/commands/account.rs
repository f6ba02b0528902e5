//! Account listing commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use workforce_core::error::AppError;
use workforce_database::DatabasePool;
use workforce_database::repositories::{AccountRepository, PgAccountRepository};
use workforce_entity::account::Role;

use crate::output::{self, OutputFormat};

/// Arguments for account commands
#[derive(Debug, Args)]
pub struct AccountArgs {
    /// Account subcommand
    #[command(subcommand)]
    pub command: AccountCommand,
}

/// Account subcommands
#[derive(Debug, Subcommand)]
pub enum AccountCommand {
    /// List all accounts
    List {
        /// Only accounts with this role (`admin` or `employee`)
        #[arg(short, long)]
        role: Option<String>,
    },
}

/// Account display row for table output
#[derive(Debug, Serialize, Tabled)]
struct AccountRow {
    id: String,
    name: String,
    email: String,
    role: String,
    created_at: String,
}

/// Execute account commands
pub async fn execute(
    args: &AccountArgs,
    db: &DatabasePool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let accounts = PgAccountRepository::new(db.pool().clone());

    match &args.command {
        AccountCommand::List { role } => {
            let role: Option<Role> = role.as_deref().map(str::parse).transpose()?;
            let rows: Vec<AccountRow> = accounts
                .list()
                .await?
                .into_iter()
                .filter(|a| role.is_none_or(|r| a.role == r))
                .map(|a| AccountRow {
                    id: a.id.to_string(),
                    name: a.name,
                    email: a.email,
                    role: a.role.to_string(),
                    created_at: a.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
    }

    Ok(())
}
