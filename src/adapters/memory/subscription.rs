use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::{Activation, Subscription};
use crate::ports::SubscriptionRepository;

use super::{poisoned, simulated_failure};

/// Subscription rows keyed by user id.
#[derive(Default)]
pub struct InMemorySubscriptionRepository {
    rows: RwLock<HashMap<UserId, Subscription>>,
    fail_writes: AtomicBool,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a row directly, bypassing the webhook path.
    pub fn insert(&self, subscription: Subscription) -> Result<(), DomainError> {
        self.rows
            .write()
            .map_err(|_| poisoned())?
            .insert(subscription.user_id.clone(), subscription);
        Ok(())
    }

    /// Makes every subsequent upsert fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Number of stored rows.
    pub fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn upsert_activation(
        &self,
        activation: &Activation,
    ) -> Result<Subscription, DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(simulated_failure());
        }

        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let row = activation.apply_to(rows.get(&activation.user_id));
        rows.insert(row.user_id.clone(), row.clone());
        Ok(row)
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError> {
        Ok(self.rows.read().map_err(|_| poisoned())?.get(user_id).cloned())
    }
}
