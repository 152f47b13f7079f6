//! GetSubscriptionHandler - Query handler for the caller's plan entitlement.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::memorial::can_publish;
use crate::domain::subscription::{Subscription, SubscriptionError};
use crate::ports::SubscriptionRepository;

/// Query for a user's subscription.
#[derive(Debug, Clone)]
pub struct GetSubscriptionQuery {
    pub user_id: UserId,
}

/// The stored row (if any) and whether it passes the visibility gate now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetSubscriptionResult {
    pub subscription: Option<Subscription>,
    pub can_publish: bool,
}

/// Handler for reading a subscription.
pub struct GetSubscriptionHandler {
    repository: Arc<dyn SubscriptionRepository>,
}

impl GetSubscriptionHandler {
    pub fn new(repository: Arc<dyn SubscriptionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetSubscriptionQuery,
    ) -> Result<GetSubscriptionResult, SubscriptionError> {
        let subscription = self.repository.find_by_user_id(&query.user_id).await?;
        let can_publish = can_publish(subscription.as_ref(), &Timestamp::now());

        Ok(GetSubscriptionResult {
            subscription,
            can_publish,
        })
    }
}
