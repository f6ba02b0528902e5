//! Admin account management commands.

use clap::{Args, Subcommand};

use workforce_auth::password::{PasswordHasher, PasswordValidator};
use workforce_core::config::AppConfig;
use workforce_core::error::AppError;
use workforce_database::DatabasePool;
use workforce_database::repositories::{AccountRepository, PgAccountRepository};
use workforce_entity::account::{CreateAccount, Role};

use crate::output;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create a new admin account
    Create {
        /// Display name
        #[arg(short, long)]
        name: Option<String>,
        /// Login email
        #[arg(short, long)]
        email: Option<String>,
        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Reset an account's password
    ResetPassword {
        /// Login email of the account
        #[arg(short, long)]
        email: String,
        /// New password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },
}

/// Execute admin commands
pub async fn execute(args: &AdminArgs, config: &AppConfig, db: &DatabasePool) -> Result<(), AppError> {
    let accounts = PgAccountRepository::new(db.pool().clone());
    let hasher = PasswordHasher::new(&config.auth.argon2)?;
    let validator = PasswordValidator::new(&config.auth);

    match &args.command {
        AdminCommand::Create {
            name,
            email,
            password,
        } => {
            let name = match name {
                Some(n) => n.clone(),
                None => prompt("Admin name")?,
            };
            let email = match email {
                Some(e) => e.clone(),
                None => prompt("Admin email")?,
            };
            if name.trim().is_empty() || !email.contains('@') {
                return Err(AppError::validation("A name and a valid email are required"));
            }

            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password("Admin password")?,
            };
            validator.validate(&password, &[&email, &name])?;

            let account = accounts
                .create(&CreateAccount {
                    email: email.clone(),
                    password_hash: hasher.hash(&password).await?,
                    name: name.trim().to_string(),
                    role: Role::Admin,
                    profile_image: None,
                })
                .await?;

            output::print_success("Admin account created");
            output::print_kv("id", &account.id.to_string());
            output::print_kv("email", &account.email);
        }
        AdminCommand::ResetPassword { email, password } => {
            let account = accounts
                .find_by_email(email)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Account '{email}' not found")))?;

            let password = match password {
                Some(p) => p.clone(),
                None => prompt_password("New password")?,
            };
            validator.validate(&password, &[&account.email, &account.name])?;

            accounts
                .update_password(account.id, &hasher.hash(&password).await?)
                .await?;

            output::print_success(&format!("Password reset for '{email}'"));
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String, AppError> {
    dialoguer::Input::<String>::new()
        .with_prompt(label)
        .interact_text()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}

fn prompt_password(label: &str) -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt(label)
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
