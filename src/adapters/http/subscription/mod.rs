//! HTTP adapter for checkout, the payment webhook and subscription status.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CheckoutResponse, CreateCheckoutRequest, SubscriptionResponse, SubscriptionView,
    WebhookReceivedResponse,
};
pub use handlers::SIGNATURE_HEADER;
pub use routes::{subscription_routes, webhook_routes};
