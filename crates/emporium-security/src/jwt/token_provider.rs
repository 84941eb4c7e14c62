//! JWT token provider for creating and validating tokens.

use super::Claims;
use chrono::{Duration, Utc};
use emporium_config::SecurityConfig;
use emporium_core::{EmporiumError, EmporiumResult, MessageKey, User};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;
use tracing::{debug, warn};

/// Issued access token.
#[derive(Debug, Clone)]
pub struct AccessToken {
    /// Encoded JWT.
    pub token: String,
    /// Expiration timestamp.
    pub expires_at: i64,
    /// Token type (always "Bearer").
    pub token_type: String,
}

/// JWT token provider service.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Issues an access token for a user.
    pub fn issue(&self, user: &User) -> EmporiumResult<AccessToken> {
        let expires_at =
            Utc::now() + Duration::seconds(self.config.jwt_access_expiration_secs as i64);

        let claims = Claims::new_access(
            user.id,
            user.email.clone(),
            user.role,
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            EmporiumError::internal(
                MessageKey::InternalError,
                format!("Failed to generate access token: {}", e),
            )
        })?;

        debug!("Generated access token for user {}", user.id);
        Ok(AccessToken {
            token,
            expires_at: expires_at.timestamp(),
            token_type: "Bearer".to_string(),
        })
    }

    /// Validates a token and returns the claims.
    pub fn validate(&self, token: &str) -> EmporiumResult<Claims> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                        EmporiumError::TokenExpired
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidToken
                    | jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        EmporiumError::InvalidToken("Invalid token signature".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidIssuer => {
                        EmporiumError::InvalidToken("Invalid token issuer".to_string())
                    }
                    jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                        EmporiumError::InvalidToken("Invalid token audience".to_string())
                    }
                    _ => EmporiumError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
