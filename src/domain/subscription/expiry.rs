//! Expiry computation for completed purchases.

use crate::domain::foundation::Timestamp;

use super::Plan;

/// Returns the expiry granted by buying `plan` at `paid_at`.
///
/// Terms are calendar based: Legacy adds one month, Evermore one year.
/// Free grants nothing, so the returned `None` leaves any stored expiry
/// untouched.
pub fn expiry_for(plan: Plan, paid_at: Timestamp) -> Option<Timestamp> {
    plan.term_months()
        .and_then(|months| paid_at.add_calendar_months(months))
}
