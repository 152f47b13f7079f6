//! Memorial repository port.
//!
//! # Visibility gate
//!
//! `insert` and `update` must refuse to store `visibility = public` unless
//! the owner's subscription passes the gate, returning a `DomainError`
//! with `ErrorCode::PaidPlanRequired`. Handlers check the gate first; this
//! requirement covers writers that bypass them.

use crate::domain::foundation::{DomainError, MemorialId, UserId};
use crate::domain::memorial::Memorial;
use async_trait::async_trait;

#[async_trait]
pub trait MemorialRepository: Send + Sync {
    /// Store a new memorial.
    async fn insert(&self, memorial: &Memorial) -> Result<(), DomainError>;

    /// Overwrite an existing memorial owned by `memorial.owner_id`.
    ///
    /// Returns `false` when no row with that id and owner exists.
    async fn update(&self, memorial: &Memorial) -> Result<bool, DomainError>;

    /// Find a memorial by id regardless of owner.
    async fn find_by_id(&self, id: &MemorialId) -> Result<Option<Memorial>, DomainError>;

    /// All memorials of an owner, newest first.
    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Memorial>, DomainError>;
}
