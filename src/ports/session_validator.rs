//! Session validation port for bearer token validation.
//!
//! Provider-agnostic: the HS256 JWT validator and the test mock both
//! implement it.
//!
//! All implementations MUST validate the signature, the audience and the
//! expiry of the token.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts user identity.
///
/// # Contract
///
/// Implementations must:
/// - Return `AuthError::InvalidToken` for malformed/bad signature tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::ServiceUnavailable` for misconfiguration
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate an access token (without "Bearer " prefix) and return the user.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
