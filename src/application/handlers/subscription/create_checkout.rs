//! CreateCheckoutHandler - Command handler for starting a plan purchase.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::subscription::{Plan, PlanPrice, SubscriptionError};
use crate::ports::{
    CheckoutLineItem, CheckoutSession, CreateCheckoutRequest, PaymentMethodType, PaymentProvider,
};

/// Metadata key carrying the buyer's user id through the gateway.
pub const METADATA_USER_ID: &str = "user_id";

/// Metadata key carrying the purchased plan through the gateway.
pub const METADATA_PLAN: &str = "plan";

/// Command to create a hosted checkout session for a plan.
#[derive(Debug, Clone, Default)]
pub struct CreateCheckoutCommand {
    /// Plan key from the request body.
    pub plan: Option<String>,
    /// User id from the request body.
    pub user_id: Option<String>,
    /// Identity of the caller, when a valid bearer token was sent.
    pub caller: Option<UserId>,
}

/// Result of a successful checkout creation.
#[derive(Debug, Clone)]
pub struct CreateCheckoutResult {
    pub session: CheckoutSession,
    pub plan: Plan,
    pub user_id: UserId,
}

/// Handler for creating checkout sessions.
///
/// Nothing is stored here; the subscription row is written when the
/// gateway reports the session as paid.
pub struct CreateCheckoutHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    base_url: String,
}

impl CreateCheckoutHandler {
    /// `base_url` is the public origin the gateway redirects back to.
    pub fn new(payment_provider: Arc<dyn PaymentProvider>, base_url: impl Into<String>) -> Self {
        Self {
            payment_provider,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutCommand,
    ) -> Result<CreateCheckoutResult, SubscriptionError> {
        // 1. Both fields must be present
        let plan_key = non_blank(cmd.plan).ok_or(SubscriptionError::MissingPlanOrUser)?;
        let user_key = non_blank(cmd.user_id).ok_or(SubscriptionError::MissingPlanOrUser)?;

        // 2. Plan must be in the price table
        let (plan, price) = Plan::purchasable(&plan_key)?;
        let user_id = UserId::new(user_key).map_err(|_| SubscriptionError::MissingPlanOrUser)?;

        // 3. A signed-in caller may only buy for themselves
        if let Some(caller) = &cmd.caller {
            if caller != &user_id {
                tracing::warn!(
                    caller = %caller,
                    user_id = %user_id,
                    "Checkout requested for another user"
                );
                return Err(SubscriptionError::UserMismatch);
            }
        }

        // 4. Mint the session
        let request = checkout_request(plan, price, &user_id, &self.base_url);
        let session = self
            .payment_provider
            .create_checkout_session(request)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id = %user_id,
                    plan = plan.as_str(),
                    code = ?e.code,
                    "Checkout session creation failed: {}",
                    e.message
                );
                SubscriptionError::payment_failed(e.message)
            })?;

        tracing::info!(
            user_id = %user_id,
            plan = plan.as_str(),
            session_id = %session.id,
            "Checkout session created"
        );

        Ok(CreateCheckoutResult {
            session,
            plan,
            user_id,
        })
    }
}

/// Builds the gateway request for buying `plan`.
pub(crate) fn checkout_request(
    plan: Plan,
    price: PlanPrice,
    user_id: &UserId,
    base_url: &str,
) -> CreateCheckoutRequest {
    let mut metadata = BTreeMap::new();
    metadata.insert(METADATA_USER_ID.to_string(), user_id.to_string());
    metadata.insert(METADATA_PLAN.to_string(), plan.as_str().to_string());

    CreateCheckoutRequest {
        line_items: vec![CheckoutLineItem {
            amount: price.amount,
            currency: price.currency.to_string(),
            name: price.name.to_string(),
            quantity: 1,
        }],
        payment_method_types: PaymentMethodType::ALL.to_vec(),
        metadata,
        success_url: format!("{}/dashboard?payment=success", base_url),
        cancel_url: format!("{}/pricing?payment=cancel", base_url),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
