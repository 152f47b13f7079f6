//! Subscription handlers.
//!
//! ## Commands
//! - Creating hosted checkout sessions for a plan
//! - Processing PayMongo payment webhooks
//!
//! ## Queries
//! - Get the caller's subscription and publish entitlement

mod create_checkout;
mod get_subscription;
mod handle_payment_webhook;

// Commands
pub use create_checkout::{
    CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult, METADATA_PLAN,
    METADATA_USER_ID,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};

// Queries
pub use get_subscription::{GetSubscriptionHandler, GetSubscriptionQuery, GetSubscriptionResult};
