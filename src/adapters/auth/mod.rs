//! Authentication adapters.
//!
//! Implementations of the `SessionValidator` port:
//!
//! - `jwt` - HS256 access tokens signed by the identity provider
//! - `mock` - Test implementation that doesn't require a signing secret

mod jwt;
mod mock;

pub use jwt::{JwtConfig, JwtSessionValidator, DEFAULT_AUDIENCE};
pub use mock::MockSessionValidator;

#[cfg(test)]
pub(crate) use jwt::{sign_test_token, AccessTokenClaims, UserMetadata};
