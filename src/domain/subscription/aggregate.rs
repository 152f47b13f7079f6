//! Subscription record and activation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::{expiry_for, Plan, SubscriptionStatus};

/// A user's plan entitlement. At most one per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub user_id: UserId,
    pub plan: Plan,
    pub status: SubscriptionStatus,
    /// End of the paid term. `None` means open ended.
    pub expiry_date: Option<Timestamp>,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Returns true if the term has ended at `now`.
    pub fn is_expired(&self, now: &Timestamp) -> bool {
        match &self.expiry_date {
            Some(expiry) => !expiry.is_after(now),
            None => false,
        }
    }

    /// Returns true if this subscription currently allows public memorials.
    pub fn permits_publishing(&self, now: &Timestamp) -> bool {
        self.status.permits_publishing() && self.plan.is_paid() && !self.is_expired(now)
    }
}

/// Absolute state written when a checkout completes.
///
/// Derived only from the payment event, so applying it twice yields the
/// same row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    pub user_id: UserId,
    pub plan: Plan,
    /// New expiry; `None` keeps whatever expiry is already stored.
    pub expiry_date: Option<Timestamp>,
    /// When the payment happened.
    pub paid_at: Timestamp,
}

impl Activation {
    /// Builds the activation for a purchase of `plan` at `paid_at`.
    pub fn for_purchase(user_id: UserId, plan: Plan, paid_at: Timestamp) -> Self {
        Self {
            user_id,
            plan,
            expiry_date: expiry_for(plan, paid_at),
            paid_at,
        }
    }

    /// Status every activation writes.
    pub fn status(&self) -> SubscriptionStatus {
        SubscriptionStatus::Active
    }

    /// Resulting row when applied over `existing`.
    pub fn apply_to(&self, existing: Option<&Subscription>) -> Subscription {
        let expiry_date = self
            .expiry_date
            .or_else(|| existing.and_then(|s| s.expiry_date));

        Subscription {
            user_id: self.user_id.clone(),
            plan: self.plan,
            status: self.status(),
            expiry_date,
            updated_at: self.paid_at,
        }
    }
}
