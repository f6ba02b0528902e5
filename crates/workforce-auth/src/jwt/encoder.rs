//! JWT token creation with configurable TTLs.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use workforce_core::config::AuthConfig;
use workforce_core::error::AppError;
use workforce_entity::account::AccountIdentity;

use super::claims::{Claims, TokenType};

/// Creates signed HS256 access and refresh tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish_non_exhaustive()
    }
}

/// Result of a successful token pair generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Bearer credential for API requests.
    pub access_token: String,
    /// Credential for `POST /api/auth/refresh`.
    pub refresh_token: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.access_token_ttl_minutes as i64),
            refresh_ttl: Duration::hours(config.refresh_token_ttl_hours as i64),
        }
    }

    /// Generates a new access + refresh token pair for an account.
    pub fn generate_token_pair(&self, identity: &AccountIdentity) -> Result<TokenPair, AppError> {
        let now = Utc::now();
        let (access_token, access_expires_at) =
            self.sign(identity, TokenType::Access, now, self.access_ttl)?;
        let (refresh_token, refresh_expires_at) =
            self.sign(identity, TokenType::Refresh, now, self.refresh_ttl)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_at,
            refresh_expires_at,
        })
    }

    fn sign(
        &self,
        identity: &AccountIdentity,
        token_type: TokenType,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let exp = now + ttl;
        let claims = Claims {
            sub: identity.id,
            role: identity.role,
            name: identity.name.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
            token_type,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode {token_type:?} token: {e}")))?;
        Ok((token, exp))
    }
}
