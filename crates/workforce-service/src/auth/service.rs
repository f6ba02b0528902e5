//! Login, token verification, and token refresh.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use workforce_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use workforce_auth::password::PasswordHasher;
use workforce_core::error::AppError;
use workforce_database::repositories::AccountRepository;
use workforce_entity::account::AccountIdentity;

use crate::context::RequestContext;

/// Issues and verifies stateless session tokens.
#[derive(Clone)]
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    decoder: Arc<JwtDecoder>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

/// Tokens plus the identity they were issued to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    /// Access and refresh tokens.
    #[serde(flatten)]
    pub tokens: TokenPair,
    /// Identity summary (no credentials).
    pub user: AccountIdentity,
}

impl AuthService {
    /// Creates a new auth service.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            encoder,
            decoder,
        }
    }

    /// Checks an email/password pair and issues a token pair.
    ///
    /// Unknown email and wrong password fail with the same error.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let Some(account) = self.accounts.find_by_email(email).await? else {
            warn!("Login failed: invalid credentials");
            return Err(AppError::invalid_credentials());
        };

        if !self.hasher.verify(password, &account.password_hash).await? {
            warn!(account_id = %account.id, "Login failed: invalid credentials");
            return Err(AppError::invalid_credentials());
        }

        let identity = account.identity();
        let tokens = self.encoder.generate_token_pair(&identity)?;
        info!(account_id = %identity.id, role = %identity.role, "Login successful");

        Ok(LoginResult {
            tokens,
            user: identity,
        })
    }

    /// Validates an access token and re-reads the account it names.
    pub async fn verify_token(&self, token: &str) -> Result<RequestContext, AppError> {
        let claims = self.decoder.decode_access_token(token)?;
        let identity = self.load_identity(&claims.sub).await?;
        Ok(RequestContext::new(&identity))
    }

    /// Exchanges a refresh token for a new token pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<LoginResult, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;
        let identity = self.load_identity(&claims.sub).await?;
        let tokens = self.encoder.generate_token_pair(&identity)?;
        info!(account_id = %identity.id, "Tokens refreshed");

        Ok(LoginResult {
            tokens,
            user: identity,
        })
    }

    async fn load_identity(
        &self,
        account_id: &workforce_core::types::AccountId,
    ) -> Result<AccountIdentity, AppError> {
        self.accounts
            .find_by_id(*account_id)
            .await?
            .map(|a| a.identity())
            .ok_or_else(|| AppError::unknown_account("Account no longer exists"))
    }
}
