//! Password change for the signed-in account.

use std::sync::Arc;

use tracing::{info, warn};

use workforce_auth::password::{PasswordHasher, PasswordValidator};
use workforce_core::error::AppError;
use workforce_database::repositories::AccountRepository;

use crate::context::RequestContext;

/// Self-service account settings.
#[derive(Clone)]
pub struct SettingService {
    accounts: Arc<dyn AccountRepository>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
}

impl std::fmt::Debug for SettingService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingService").finish_non_exhaustive()
    }
}

impl SettingService {
    /// Creates a new settings service.
    pub fn new(
        accounts: Arc<dyn AccountRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            accounts,
            hasher,
            validator,
        }
    }

    /// Replace the caller's password after checking the current one.
    ///
    /// Issued tokens stay valid until they expire.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let account = self
            .accounts
            .find_by_id(ctx.account_id)
            .await?
            .ok_or_else(|| AppError::unknown_account("Account no longer exists"))?;

        if !self
            .hasher
            .verify(old_password, &account.password_hash)
            .await?
        {
            warn!(account_id = %account.id, "Password change rejected: wrong current password");
            return Err(AppError::invalid_credentials());
        }

        self.validator.validate_not_same(old_password, new_password)?;
        self.validator
            .validate(new_password, &[&account.email, &account.name])?;

        let hash = self.hasher.hash(new_password).await?;
        self.accounts.update_password(account.id, &hash).await?;
        info!(account_id = %account.id, "Password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use workforce_core::ErrorKind;
    use workforce_entity::account::Role;

    use crate::context::RequestContext;
    use crate::testing::{Fixture, STRONG_PASSWORD};

    const NEXT_PASSWORD: &str = "Tm4$wQz8!kNe3Y";

    #[tokio::test]
    async fn test_change_then_login_with_new_password() {
        let fx = Fixture::new();
        let account = fx.account("alice@example.com", Role::Employee).await;
        let ctx = RequestContext::new(&account.identity());

        fx.settings
            .change_password(&ctx, STRONG_PASSWORD, NEXT_PASSWORD)
            .await
            .unwrap();

        assert!(
            fx.auth
                .authenticate("alice@example.com", NEXT_PASSWORD)
                .await
                .is_ok()
        );
        let err = fx
            .auth
            .authenticate("alice@example.com", STRONG_PASSWORD)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_wrong_current_same_and_weak() {
        let fx = Fixture::new();
        let account = fx.account("alice@example.com", Role::Employee).await;
        let ctx = RequestContext::new(&account.identity());

        let err = fx
            .settings
            .change_password(&ctx, "Wrong-guess-99", NEXT_PASSWORD)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidCredentials);

        let err = fx
            .settings
            .change_password(&ctx, STRONG_PASSWORD, STRONG_PASSWORD)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = fx
            .settings
            .change_password(&ctx, STRONG_PASSWORD, "short1")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_unknown_account() {
        let fx = Fixture::new();
        let account = fx.account("alice@example.com", Role::Employee).await;
        let mut ctx = RequestContext::new(&account.identity());
        ctx.account_id = workforce_core::types::AccountId::new();

        let err = fx
            .settings
            .change_password(&ctx, STRONG_PASSWORD, NEXT_PASSWORD)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnknownAccount);
    }
}
