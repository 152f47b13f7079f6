//! Request and response DTOs for checkout, webhook and subscription endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::handlers::subscription::GetSubscriptionResult;
use crate::domain::subscription::{Plan, Subscription, SubscriptionStatus};

/// Request to start a hosted checkout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    pub plan: Option<String>,
    pub user_id: Option<String>,
}

/// Hosted checkout page to redirect the browser to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

/// Webhook acknowledgement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebhookReceivedResponse {
    pub received: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionView {
    pub plan: Plan,
    pub status: SubscriptionStatus,
    pub expiry_date: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Subscription> for SubscriptionView {
    fn from(sub: &Subscription) -> Self {
        Self {
            plan: sub.plan,
            status: sub.status,
            expiry_date: sub.expiry_date.map(|t| *t.as_datetime()),
            updated_at: *sub.updated_at.as_datetime(),
        }
    }
}

/// Caller's subscription and whether it currently permits publishing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub subscription: Option<SubscriptionView>,
    pub can_publish: bool,
}

impl From<GetSubscriptionResult> for SubscriptionResponse {
    fn from(result: GetSubscriptionResult) -> Self {
        Self {
            subscription: result.subscription.as_ref().map(SubscriptionView::from),
            can_publish: result.can_publish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_request_reads_camel_case() {
        let req: CreateCheckoutRequest =
            serde_json::from_str(r#"{"plan": "legacy", "userId": "user-1"}"#).unwrap();
        assert_eq!(req.plan.as_deref(), Some("legacy"));
        assert_eq!(req.user_id.as_deref(), Some("user-1"));
    }

    #[test]
    fn checkout_request_tolerates_missing_fields() {
        let req: CreateCheckoutRequest = serde_json::from_str("{}").unwrap();
        assert!(req.plan.is_none());
        assert!(req.user_id.is_none());
    }

    #[test]
    fn checkout_response_uses_checkout_url_key() {
        let json = serde_json::to_value(CheckoutResponse {
            checkout_url: "https://checkout.paymongo.com/cs_1".to_string(),
        })
        .unwrap();
        assert_eq!(json["checkoutUrl"], "https://checkout.paymongo.com/cs_1");
    }

    #[test]
    fn subscription_response_serializes_can_publish() {
        let response = SubscriptionResponse {
            subscription: None,
            can_publish: false,
        };
        let json = serde_json::to_value(response).unwrap();
        assert_eq!(json["canPublish"], false);
        assert!(json["subscription"].is_null());
    }
}
