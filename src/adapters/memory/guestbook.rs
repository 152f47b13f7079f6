use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, GuestbookEntryId, MemorialId};
use crate::domain::memorial::GuestbookEntry;
use crate::ports::GuestbookRepository;

use super::{newest_first, poisoned};

/// Guestbook entries in insertion order.
#[derive(Default)]
pub struct InMemoryGuestbookRepository {
    rows: RwLock<Vec<GuestbookEntry>>,
}

impl InMemoryGuestbookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuestbookRepository for InMemoryGuestbookRepository {
    async fn insert(&self, entry: &GuestbookEntry) -> Result<(), DomainError> {
        self.rows.write().map_err(|_| poisoned())?.push(entry.clone());
        Ok(())
    }

    async fn list_by_memorial(
        &self,
        memorial_id: &MemorialId,
    ) -> Result<Vec<GuestbookEntry>, DomainError> {
        let rows: Vec<GuestbookEntry> = self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|e| &e.memorial_id == memorial_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |e| e.created_at))
    }

    async fn delete(
        &self,
        memorial_id: &MemorialId,
        entry_id: &GuestbookEntryId,
    ) -> Result<bool, DomainError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let before = rows.len();
        rows.retain(|e| !(&e.id == entry_id && &e.memorial_id == memorial_id));
        Ok(rows.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};

    fn entry(memorial_id: MemorialId, at: Timestamp) -> GuestbookEntry {
        GuestbookEntry::new(
            memorial_id,
            UserId::new("visitor-1").unwrap(),
            "Ana",
            "Rest easy.",
            None,
            at,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn delete_is_scoped_to_memorial() {
        let repo = InMemoryGuestbookRepository::new();
        let memorial = MemorialId::new();
        let e = entry(memorial, Timestamp::now());
        repo.insert(&e).await.unwrap();

        assert!(!repo.delete(&MemorialId::new(), &e.id).await.unwrap());
        assert!(repo.delete(&memorial, &e.id).await.unwrap());
        assert!(repo.list_by_memorial(&memorial).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn entries_list_newest_first() {
        let repo = InMemoryGuestbookRepository::new();
        let memorial = MemorialId::new();
        let now = Timestamp::now();
        let old = entry(memorial, now.add_days(-1));
        let new = entry(memorial, now);
        repo.insert(&old).await.unwrap();
        repo.insert(&new).await.unwrap();

        let listed = repo.list_by_memorial(&memorial).await.unwrap();
        assert_eq!(listed[0].id, new.id);
        assert_eq!(listed[1].id, old.id);
    }
}
