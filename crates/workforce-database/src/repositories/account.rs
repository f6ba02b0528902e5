//! Account repository.

use async_trait::async_trait;
use sqlx::PgPool;

use workforce_core::error::{AppError, ErrorKind};
use workforce_core::result::AppResult;
use workforce_core::types::AccountId;
use workforce_entity::account::{Account, CreateAccount};

/// Credential store: accounts looked up by key or email.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by primary key.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;
    /// Find an account by its exact email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;
    /// Insert a standalone account (used for admins without a profile).
    async fn create(&self, data: &CreateAccount) -> AppResult<Account>;
    /// Replace an account's password hash.
    async fn update_password(&self, id: AccountId, password_hash: &str) -> AppResult<()>;
    /// All accounts, oldest first.
    async fn list(&self) -> AppResult<Vec<Account>>;
}

/// PostgreSQL-backed [`AccountRepository`].
#[derive(Debug, Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map insert failures on `accounts` to domain errors.
pub(crate) fn map_account_insert_error(e: sqlx::Error, email: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db) if db.constraint() == Some("accounts_email_key") => {
            AppError::conflict(format!("Email '{email}' is already registered"))
        }
        _ => AppError::with_source(ErrorKind::Database, "Failed to create account", e),
    }
}

#[async_trait]
impl AccountRepository for PgAccountRepository {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by id", e)
            })
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find account by email", e)
            })
    }

    async fn create(&self, data: &CreateAccount) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, email, password_hash, name, role, profile_image) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(AccountId::new())
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(&data.name)
        .bind(data.role)
        .bind(&data.profile_image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_account_insert_error(e, &data.email))
    }

    async fn update_password(&self, id: AccountId, password_hash: &str) -> AppResult<()> {
        let result =
            sqlx::query("UPDATE accounts SET password_hash = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(password_hash)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to update password", e)
                })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Account {id} not found")));
        }
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list accounts", e))
    }
}
