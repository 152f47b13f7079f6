//! Subscription repository port.
//!
//! Subscriptions are keyed by user id and written only by the webhook
//! handler, through `upsert_activation`.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::{Activation, Subscription};
use async_trait::async_trait;

/// Repository port for subscription rows.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Insert or replace the user's row from a completed checkout.
    ///
    /// Sets plan, `active` status and expiry; an activation without an
    /// expiry keeps the stored one. Concurrent calls for the same user
    /// must resolve to a single row.
    async fn upsert_activation(&self, activation: &Activation) -> Result<Subscription, DomainError>;

    /// Find the subscription of a user.
    ///
    /// Returns `None` if the user never purchased a plan.
    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError>;
}
