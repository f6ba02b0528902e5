//! JWT token validation.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use workforce_core::config::AuthConfig;
use workforce_core::error::AppError;

use super::claims::{Claims, TokenType};

/// Validates token signature, expiry, and type.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5; // seconds of clock skew
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token string.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Access)
    }

    /// Decodes and validates a refresh token string.
    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AppError> {
        self.decode_typed(token, TokenType::Refresh)
    }

    fn decode_typed(&self, token: &str, expected: TokenType) -> Result<Claims, AppError> {
        let claims = self.decode_token(token)?;
        if claims.token_type != expected {
            return Err(AppError::invalid_token(format!(
                "Invalid token type: expected {expected:?} token"
            )));
        }
        Ok(claims)
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        use jsonwebtoken::errors::ErrorKind as JwtErrorKind;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    JwtErrorKind::ExpiredSignature => AppError::invalid_token("Token has expired"),
                    JwtErrorKind::InvalidSignature => {
                        AppError::invalid_token("Invalid token signature")
                    }
                    JwtErrorKind::InvalidToken => AppError::invalid_token("Invalid token format"),
                    _ => AppError::invalid_token(format!("Token validation failed: {e}")),
                }
            })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    use workforce_core::ErrorKind;
    use workforce_core::types::AccountId;
    use workforce_entity::account::{AccountIdentity, Role};

    use super::*;
    use crate::jwt::JwtEncoder;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: secret.to_string(),
            ..AuthConfig::default()
        }
    }

    fn identity() -> AccountIdentity {
        AccountIdentity {
            id: AccountId::new(),
            email: "alice@example.com".into(),
            name: "Alice".into(),
            role: Role::Employee,
            profile_image: None,
        }
    }

    #[test]
    fn test_roundtrip_access_and_refresh() {
        let cfg = config("s3cret");
        let who = identity();
        let pair = JwtEncoder::new(&cfg).generate_token_pair(&who).unwrap();
        let decoder = JwtDecoder::new(&cfg);

        let access = decoder.decode_access_token(&pair.access_token).unwrap();
        assert_eq!(access.account_id(), who.id);
        assert_eq!(access.role, Role::Employee);
        assert_eq!(access.name, "Alice");

        let refresh = decoder.decode_refresh_token(&pair.refresh_token).unwrap();
        assert_eq!(refresh.token_type, TokenType::Refresh);
        assert!(pair.refresh_expires_at > pair.access_expires_at);
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let cfg = config("s3cret");
        let pair = JwtEncoder::new(&cfg).generate_token_pair(&identity()).unwrap();
        let decoder = JwtDecoder::new(&cfg);

        let err = decoder.decode_access_token(&pair.refresh_token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
        let err = decoder.decode_refresh_token(&pair.access_token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_foreign_key_rejected() {
        let pair = JwtEncoder::new(&config("key-one"))
            .generate_token_pair(&identity())
            .unwrap();
        let err = JwtDecoder::new(&config("key-two"))
            .decode_access_token(&pair.access_token)
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }

    #[test]
    fn test_expired_and_garbage_rejected() {
        let cfg = config("s3cret");
        let past = Utc::now().timestamp() - 3600;
        let claims = Claims {
            sub: AccountId::new(),
            role: Role::Admin,
            name: "old".into(),
            iat: past - 60,
            exp: past,
            jti: Uuid::new_v4(),
            token_type: TokenType::Access,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        )
        .unwrap();
        let decoder = JwtDecoder::new(&cfg);

        let err = decoder.decode_access_token(&token).unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
        assert!(err.message.contains("expired"));

        let err = decoder.decode_access_token("not.a.jwt").unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidToken);
    }
}
