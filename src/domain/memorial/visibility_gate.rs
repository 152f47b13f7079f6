//! The rule deciding whether a memorial may be public.

use crate::domain::foundation::Timestamp;
use crate::domain::subscription::Subscription;

use super::errors::MemorialError;
use super::values::Visibility;

/// Returns true if the owner's subscription allows public memorials at `now`.
///
/// No subscription means the free plan.
pub fn can_publish(subscription: Option<&Subscription>, now: &Timestamp) -> bool {
    subscription.map_or(false, |s| s.permits_publishing(now))
}

/// Rejects a write whose resulting visibility is public when the gate is closed.
pub fn ensure_visibility_allowed(
    visibility: Visibility,
    subscription: Option<&Subscription>,
    now: &Timestamp,
) -> Result<(), MemorialError> {
    if visibility.is_public() && !can_publish(subscription, now) {
        return Err(MemorialError::PaidPlanRequired);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::subscription::{Plan, SubscriptionStatus};

    fn sub(plan: Plan, status: SubscriptionStatus, expiry: Option<Timestamp>) -> Subscription {
        Subscription {
            user_id: UserId::new("owner-1").unwrap(),
            plan,
            status,
            expiry_date: expiry,
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn no_subscription_cannot_publish() {
        assert!(!can_publish(None, &Timestamp::now()));
    }

    #[test]
    fn free_plan_cannot_publish() {
        let s = sub(Plan::Free, SubscriptionStatus::Active, None);
        assert!(!can_publish(Some(&s), &Timestamp::now()));
    }

    #[test]
    fn active_legacy_can_publish() {
        let now = Timestamp::now();
        let s = sub(Plan::Legacy, SubscriptionStatus::Active, Some(now.add_days(20)));
        assert!(can_publish(Some(&s), &now));
    }

    #[test]
    fn lapsed_legacy_cannot_publish() {
        let now = Timestamp::now();
        let s = sub(Plan::Legacy, SubscriptionStatus::Active, Some(now.add_days(-1)));
        assert!(!can_publish(Some(&s), &now));
    }

    #[test]
    fn private_writes_pass_without_subscription() {
        assert!(ensure_visibility_allowed(Visibility::Private, None, &Timestamp::now()).is_ok());
    }

    #[test]
    fn public_write_without_plan_is_refused() {
        assert_eq!(
            ensure_visibility_allowed(Visibility::Public, None, &Timestamp::now()),
            Err(MemorialError::PaidPlanRequired)
        );
    }
}
