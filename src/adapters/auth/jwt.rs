//! HS256 JWT session validator.
//!
//! The identity provider signs access tokens with a shared secret. This
//! adapter validates them by:
//!
//! 1. Checking the HS256 signature against the configured secret
//! 2. Validating the audience and expiry claims
//! 3. Mapping claims to the domain `AuthenticatedUser` type
//!
//! # Example
//!
//! ```ignore
//! use secrecy::SecretString;
//! use hereafter_pal::adapters::auth::{JwtConfig, JwtSessionValidator};
//!
//! let config = JwtConfig::new(SecretString::new("signing-secret".into()), "authenticated");
//! let validator = JwtSessionValidator::new(config);
//! let user = validator.validate("eyJ...").await?;
//! ```

use async_trait::async_trait;
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::SessionValidator;

/// Audience claim carried by signed-in users' tokens.
pub const DEFAULT_AUDIENCE: &str = "authenticated";

/// Configuration for the JWT validator.
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared HS256 signing secret.
    pub secret: SecretString,

    /// Expected audience claim.
    pub audience: String,
}

impl JwtConfig {
    pub fn new(secret: SecretString, audience: impl Into<String>) -> Self {
        Self {
            secret,
            audience: audience.into(),
        }
    }
}

/// Claims of a provider-issued access token.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AccessTokenClaims {
    /// Subject - the user ID
    pub sub: String,

    #[serde(default)]
    pub aud: Option<String>,

    /// Expiry timestamp (Unix epoch seconds)
    pub exp: i64,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub user_metadata: UserMetadata,
}

/// Free-form profile data the provider stores at sign-up.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct UserMetadata {
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Validates HS256 access tokens issued by the identity provider.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
    audience: String,
}

impl JwtSessionValidator {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&config.audience]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub", "aud"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.secret.expose_secret().as_bytes()),
            validation,
            audience: config.audience,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidAudience => {
                    tracing::warn!(audience = %self.audience, "Invalid audience in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::warn!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            })?;
        let claims = data.claims;

        let user_id = UserId::new(&claims.sub).map_err(|_| {
            tracing::warn!("Token has blank subject");
            AuthError::InvalidToken
        })?;

        let display_name = claims
            .user_metadata
            .full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(AuthenticatedUser::new(user_id, claims.email, display_name))
    }
}

impl std::fmt::Debug for JwtSessionValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionValidator")
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

/// Signs a token the way the identity provider does.
#[cfg(test)]
pub(crate) fn sign_test_token(secret: &str, claims: &AccessTokenClaims) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    encode(&Header::default(), claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-signing-secret";

    fn validator() -> JwtSessionValidator {
        JwtSessionValidator::new(JwtConfig::new(
            SecretString::new(SECRET.to_string()),
            DEFAULT_AUDIENCE,
        ))
    }

    fn claims(sub: &str, exp_offset_secs: i64) -> AccessTokenClaims {
        AccessTokenClaims {
            sub: sub.to_string(),
            aud: Some(DEFAULT_AUDIENCE.to_string()),
            exp: chrono::Utc::now().timestamp() + exp_offset_secs,
            email: Some("ana@example.com".to_string()),
            user_metadata: UserMetadata {
                full_name: Some("Ana Reyes".to_string()),
            },
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Validation Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn valid_token_maps_claims_to_user() {
        let token = sign_test_token(SECRET, &claims("user-123", 3600));

        let user = validator().validate(&token).await.unwrap();

        assert_eq!(user.id.as_str(), "user-123");
        assert_eq!(user.email.as_deref(), Some("ana@example.com"));
        assert_eq!(user.display_name.as_deref(), Some("Ana Reyes"));
    }

    #[tokio::test]
    async fn expired_token_is_reported_as_expired() {
        let token = sign_test_token(SECRET, &claims("user-123", -3600));

        let err = validator().validate(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::TokenExpired));
    }

    #[tokio::test]
    async fn wrong_secret_is_invalid() {
        let token = sign_test_token("another-secret", &claims("user-123", 3600));

        let err = validator().validate(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn wrong_audience_is_invalid() {
        let mut c = claims("user-123", 3600);
        c.aud = Some("service_role".to_string());
        let token = sign_test_token(SECRET, &c);

        let err = validator().validate(&token).await.unwrap_err();

        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn garbage_is_invalid() {
        let err = validator().validate("not.a.jwt").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn blank_full_name_is_dropped() {
        let mut c = claims("user-123", 3600);
        c.user_metadata.full_name = Some("  ".to_string());
        let token = sign_test_token(SECRET, &c);

        let user = validator().validate(&token).await.unwrap();

        assert_eq!(user.display_name, None);
    }

    #[test]
    fn debug_output_omits_secret() {
        let output = format!("{:?}", validator());
        assert!(output.contains("authenticated"));
        assert!(!output.contains(SECRET));
    }
}
