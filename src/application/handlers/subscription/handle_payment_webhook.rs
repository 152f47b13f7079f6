//! HandlePaymentWebhookHandler - Command handler for PayMongo webhook deliveries.

use std::sync::Arc;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::subscription::{Activation, Plan, WebhookError};
use crate::ports::{PaymentProvider, SubscriptionRepository, WebhookEvent, WebhookEventType};

/// Command to handle a payment webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload, exactly as received.
    pub payload: Vec<u8>,
    /// `Paymongo-Signature` header, if sent.
    pub signature: Option<String>,
}

/// Result of webhook processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlePaymentWebhookResult {
    /// Checkout paid, subscription row written.
    SubscriptionActivated {
        user_id: UserId,
        plan: Plan,
        expiry_date: Option<Timestamp>,
    },
    /// Checkout paid but the metadata cannot be acted on.
    Acknowledged,
    /// Event type we do not handle.
    Ignored,
}

/// Handler for processing PayMongo webhooks.
///
/// The event is verified before anything is read from it. The row written
/// is derived only from the event, so redeliveries are harmless.
pub struct HandlePaymentWebhookHandler {
    repository: Arc<dyn SubscriptionRepository>,
    payment_provider: Arc<dyn PaymentProvider>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        payment_provider: Arc<dyn PaymentProvider>,
    ) -> Self {
        Self {
            repository,
            payment_provider,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        // 1. Verify webhook signature and parse event
        let signature = cmd.signature.ok_or(WebhookError::MissingSignature)?;
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &signature)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook rejected");
                e
            })?;

        // 2. Process based on event type
        match &event.event_type {
            WebhookEventType::CheckoutSessionPaid => self.handle_checkout_paid(&event).await,
            WebhookEventType::Other(event_type) => {
                tracing::debug!(
                    event_id = %event.id,
                    event_type = %event_type,
                    "Ignoring webhook event"
                );
                Ok(HandlePaymentWebhookResult::Ignored)
            }
        }
    }

    async fn handle_checkout_paid(
        &self,
        event: &WebhookEvent,
    ) -> Result<HandlePaymentWebhookResult, WebhookError> {
        let (Some(user_key), Some(plan_key)) = (&event.metadata.user_id, &event.metadata.plan)
        else {
            tracing::warn!(event_id = %event.id, "Checkout paid without user_id/plan metadata");
            return Ok(HandlePaymentWebhookResult::Acknowledged);
        };

        let Ok(plan) = plan_key.parse::<Plan>() else {
            tracing::warn!(
                event_id = %event.id,
                plan = %plan_key,
                "Checkout paid for unknown plan"
            );
            return Ok(HandlePaymentWebhookResult::Acknowledged);
        };

        let Ok(user_id) = UserId::new(user_key.as_str()) else {
            tracing::warn!(event_id = %event.id, "Checkout paid with blank user_id");
            return Ok(HandlePaymentWebhookResult::Acknowledged);
        };

        let paid_at = Timestamp::from_unix_secs(event.created_at)
            .ok_or_else(|| WebhookError::ParseError("created_at out of range".to_string()))?;

        let activation = Activation::for_purchase(user_id, plan, paid_at);
        let row = self
            .repository
            .upsert_activation(&activation)
            .await
            .map_err(|e| {
                tracing::error!(
                    event_id = %event.id,
                    user_id = %activation.user_id,
                    "Failed to store subscription: {}",
                    e
                );
                WebhookError::Database(e.message)
            })?;

        tracing::info!(
            event_id = %event.id,
            user_id = %row.user_id,
            plan = row.plan.as_str(),
            expiry_date = ?row.expiry_date,
            "Subscription activated"
        );

        Ok(HandlePaymentWebhookResult::SubscriptionActivated {
            user_id: row.user_id,
            plan: row.plan,
            expiry_date: row.expiry_date,
        })
    }
}
