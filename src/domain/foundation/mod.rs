//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, errors and the authenticated identity
//! used across the memorial, subscription and profile modules.

mod auth;
mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{GuestbookEntryId, MemorialId, PhotoId, UserId};
pub use ownership::OwnedByUser;
pub use timestamp::Timestamp;
