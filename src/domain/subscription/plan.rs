//! Subscription plan definitions and the checkout price table.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::SubscriptionError;

/// Subscription plan.
///
/// Determines whether memorials may be published and how long a
/// purchase lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Default plan. Private memorials only, never sold.
    Free,

    /// One month of publishing per purchase.
    Legacy,

    /// One year of publishing per purchase.
    Evermore,
}

/// Line-item pricing for a purchasable plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanPrice {
    /// Amount in the currency's minor unit (centavos).
    pub amount: i64,
    /// ISO 4217 code.
    pub currency: &'static str,
    /// Line-item name shown on the hosted checkout page.
    pub name: &'static str,
}

const LEGACY_PRICE: PlanPrice = PlanPrice {
    amount: 29_900,
    currency: "PHP",
    name: "The Legacy Plan",
};

const EVERMORE_PRICE: PlanPrice = PlanPrice {
    amount: 349_900,
    currency: "PHP",
    name: "The Evermore Plan",
};

impl Plan {
    /// All plans, in ascending order.
    pub const ALL: [Plan; 3] = [Plan::Free, Plan::Legacy, Plan::Evermore];

    /// Returns true if this plan was paid for.
    pub fn is_paid(&self) -> bool {
        !matches!(self, Plan::Free)
    }

    /// Checkout price, or `None` when the plan cannot be bought.
    pub fn price(&self) -> Option<PlanPrice> {
        match self {
            Plan::Free => None,
            Plan::Legacy => Some(LEGACY_PRICE),
            Plan::Evermore => Some(EVERMORE_PRICE),
        }
    }

    /// Calendar months granted by one purchase.
    pub fn term_months(&self) -> Option<u32> {
        match self {
            Plan::Free => None,
            Plan::Legacy => Some(1),
            Plan::Evermore => Some(12),
        }
    }

    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::Free => "free",
            Plan::Legacy => "legacy",
            Plan::Evermore => "evermore",
        }
    }

    /// Parses a plan key and requires it to be purchasable.
    pub fn purchasable(key: &str) -> Result<(Plan, PlanPrice), SubscriptionError> {
        let plan: Plan = key.parse()?;
        let price = plan.price().ok_or(SubscriptionError::InvalidPlan)?;
        Ok((plan, price))
    }
}

impl FromStr for Plan {
    type Err = SubscriptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Plan::Free),
            "legacy" => Ok(Plan::Legacy),
            "evermore" => Ok(Plan::Evermore),
            _ => Err(SubscriptionError::InvalidPlan),
        }
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
