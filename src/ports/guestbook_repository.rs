//! Guestbook entry repository port.

use crate::domain::foundation::{DomainError, GuestbookEntryId, MemorialId};
use crate::domain::memorial::GuestbookEntry;
use async_trait::async_trait;

#[async_trait]
pub trait GuestbookRepository: Send + Sync {
    async fn insert(&self, entry: &GuestbookEntry) -> Result<(), DomainError>;

    /// Entries of a memorial, newest first.
    async fn list_by_memorial(
        &self,
        memorial_id: &MemorialId,
    ) -> Result<Vec<GuestbookEntry>, DomainError>;

    /// Delete an entry of the given memorial.
    ///
    /// Returns `false` when the entry does not belong to that memorial.
    async fn delete(
        &self,
        memorial_id: &MemorialId,
        entry_id: &GuestbookEntryId,
    ) -> Result<bool, DomainError>;
}
