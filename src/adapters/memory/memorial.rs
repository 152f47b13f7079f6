use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, MemorialId, Timestamp, UserId};
use crate::domain::memorial::{can_publish, Memorial, PAID_PLAN_REQUIRED_MESSAGE};
use crate::ports::{MemorialRepository, SubscriptionRepository};

use super::{newest_first, poisoned, simulated_failure};

/// Memorial rows, with the same publish guard as the Postgres adapter.
pub struct InMemoryMemorialRepository {
    rows: RwLock<HashMap<MemorialId, Memorial>>,
    subscriptions: Arc<dyn SubscriptionRepository>,
    fail_writes: AtomicBool,
}

impl InMemoryMemorialRepository {
    /// `subscriptions` is consulted whenever a write would store a public memorial.
    pub fn new(subscriptions: Arc<dyn SubscriptionRepository>) -> Self {
        Self {
            rows: RwLock::new(HashMap::new()),
            subscriptions,
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent write fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Returns the stored row, bypassing any visibility rule.
    pub fn get(&self, id: &MemorialId) -> Option<Memorial> {
        self.rows.read().ok().and_then(|rows| rows.get(id).cloned())
    }

    async fn guard_publish(&self, memorial: &Memorial) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }
        if !memorial.visibility.is_public() {
            return Ok(());
        }
        let subscription = self.subscriptions.find_by_user_id(&memorial.owner_id).await?;
        if can_publish(subscription.as_ref(), &Timestamp::now()) {
            Ok(())
        } else {
            Err(DomainError::new(ErrorCode::PaidPlanRequired, PAID_PLAN_REQUIRED_MESSAGE)
                .with_detail("memorial_id", memorial.id.to_string()))
        }
    }
}

#[async_trait]
impl MemorialRepository for InMemoryMemorialRepository {
    async fn insert(&self, memorial: &Memorial) -> Result<(), DomainError> {
        self.guard_publish(memorial).await?;
        self.rows
            .write()
            .map_err(|_| poisoned())?
            .insert(memorial.id, memorial.clone());
        Ok(())
    }

    async fn update(&self, memorial: &Memorial) -> Result<bool, DomainError> {
        let owned = self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .get(&memorial.id)
            .map_or(false, |m| m.owner_id == memorial.owner_id);
        if !owned {
            return Ok(false);
        }

        self.guard_publish(memorial).await?;

        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        match rows.get_mut(&memorial.id) {
            Some(row) if row.owner_id == memorial.owner_id => {
                *row = memorial.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn find_by_id(&self, id: &MemorialId) -> Result<Option<Memorial>, DomainError> {
        Ok(self.rows.read().map_err(|_| poisoned())?.get(id).cloned())
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Memorial>, DomainError> {
        let rows: Vec<Memorial> = self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .values()
            .filter(|m| &m.owner_id == owner_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |m| m.created_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySubscriptionRepository;
    use crate::domain::memorial::{test_memorial, Visibility};
    use crate::domain::subscription::{Activation, Plan};

    fn repo() -> (Arc<InMemorySubscriptionRepository>, InMemoryMemorialRepository) {
        let subs = Arc::new(InMemorySubscriptionRepository::new());
        let memorials = InMemoryMemorialRepository::new(subs.clone());
        (subs, memorials)
    }

    #[tokio::test]
    async fn insert_refuses_public_without_plan() {
        let (_, memorials) = repo();
        let memorial = test_memorial("owner-1", Visibility::Public);

        let err = memorials.insert(&memorial).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::PaidPlanRequired);
        assert!(memorials.get(&memorial.id).is_none());
    }

    #[tokio::test]
    async fn insert_allows_public_with_active_plan() {
        let (subs, memorials) = repo();
        let owner = UserId::new("owner-1").unwrap();
        subs.upsert_activation(&Activation::for_purchase(owner, Plan::Evermore, Timestamp::now()))
            .await
            .unwrap();

        let memorial = test_memorial("owner-1", Visibility::Public);
        memorials.insert(&memorial).await.unwrap();

        assert!(memorials.get(&memorial.id).is_some());
    }

    #[tokio::test]
    async fn update_by_other_owner_returns_false() {
        let (_, memorials) = repo();
        let memorial = test_memorial("owner-1", Visibility::Private);
        memorials.insert(&memorial).await.unwrap();

        let mut hijacked = memorial.clone();
        hijacked.owner_id = UserId::new("intruder").unwrap();

        assert!(!memorials.update(&hijacked).await.unwrap());
        assert_eq!(memorials.get(&memorial.id).unwrap().owner_id.as_str(), "owner-1");
    }

    #[tokio::test]
    async fn publish_without_plan_leaves_row_unchanged() {
        let (_, memorials) = repo();
        let memorial = test_memorial("owner-1", Visibility::Private);
        memorials.insert(&memorial).await.unwrap();

        let mut published = memorial.clone();
        published.visibility = Visibility::Public;
        published.bio = Some("Rewritten.".to_string());

        let err = memorials.update(&published).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PaidPlanRequired);

        let stored = memorials.get(&memorial.id).unwrap();
        assert_eq!(stored.visibility, Visibility::Private);
        assert_eq!(stored.bio.as_deref(), Some("Loved gardening."));
    }

    #[tokio::test]
    async fn ownership_is_checked_before_plan() {
        let (_, memorials) = repo();
        let memorial = test_memorial("owner-1", Visibility::Private);
        memorials.insert(&memorial).await.unwrap();

        let mut hijacked = memorial.clone();
        hijacked.owner_id = UserId::new("intruder").unwrap();
        hijacked.visibility = Visibility::Public;

        assert!(!memorials.update(&hijacked).await.unwrap());
        assert_eq!(memorials.get(&memorial.id).unwrap().visibility, Visibility::Private);
    }

    #[tokio::test]
    async fn list_by_owner_is_newest_first() {
        let (_, memorials) = repo();
        let mut older = test_memorial("owner-1", Visibility::Private);
        older.created_at = Timestamp::now().add_days(-3);
        let newer = test_memorial("owner-1", Visibility::Private);
        let other = test_memorial("owner-2", Visibility::Private);
        for m in [&older, &newer, &other] {
            memorials.insert(m).await.unwrap();
        }

        let listed = memorials
            .list_by_owner(&UserId::new("owner-1").unwrap())
            .await
            .unwrap();

        assert_eq!(listed.iter().map(|m| m.id).collect::<Vec<_>>(), vec![newer.id, older.id]);
    }
}
