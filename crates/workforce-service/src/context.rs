//! Request context carrying the verified caller identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use workforce_core::types::AccountId;
use workforce_entity::account::{AccountIdentity, Role};

/// Context for the current authenticated request.
///
/// Built by the authorization gate from the stored account (never from
/// token claims alone) and passed into every service method.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account's ID.
    pub account_id: AccountId,
    /// The account's stored role.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Profile image reference.
    pub profile_image: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context for a verified identity.
    pub fn new(identity: &AccountIdentity) -> Self {
        Self {
            account_id: identity.id,
            role: identity.role,
            name: identity.name.clone(),
            email: identity.email.clone(),
            profile_image: identity.profile_image.clone(),
            request_time: Utc::now(),
        }
    }

    /// The caller as a public identity summary.
    pub fn identity(&self) -> AccountIdentity {
        AccountIdentity {
            id: self.account_id,
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            profile_image: self.profile_image.clone(),
        }
    }

    /// Returns whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
