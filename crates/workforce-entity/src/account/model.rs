//! Account entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use workforce_core::types::AccountId;

use super::role::Role;

/// A login identity. At most one employee profile references it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Storage key.
    pub id: AccountId,
    /// Unique login email.
    pub email: String,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Role used for authorization decisions.
    pub role: Role,
    /// Reference to an uploaded profile image, if any.
    pub profile_image: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Check if this account has admin privileges.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Strip credentials, leaving what request handlers may see.
    pub fn identity(&self) -> AccountIdentity {
        AccountIdentity {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            profile_image: self.profile_image.clone(),
        }
    }
}

/// Verified caller identity; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdentity {
    /// Account storage key.
    pub id: AccountId,
    /// Login email.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Stored role.
    pub role: Role,
    /// Profile image reference.
    pub profile_image: Option<String>,
}

/// Data required to create a new account.
#[derive(Debug, Clone)]
pub struct CreateAccount {
    /// Login email, matched exactly on lookup.
    pub email: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Assigned role.
    pub role: Role,
    /// Profile image reference.
    pub profile_image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_never_serialized() {
        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            email: "a@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            name: "A".into(),
            role: Role::Employee,
            profile_image: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_string(&account).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("createdAt"));
        assert_eq!(account.identity().email, "a@example.com");
    }
}
