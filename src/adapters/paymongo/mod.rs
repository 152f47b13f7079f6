//! PayMongo payment provider adapter.
//!
//! Implements the `PaymentProvider` port for PayMongo, including:
//! - Hosted checkout sessions
//! - Webhook signature verification
//!
//! # Configuration
//!
//! Required environment variables:
//! - `HEREAFTER__PAYMENT__SECRET_KEY`: PayMongo secret API key
//! - `HEREAFTER__PAYMENT__WEBHOOK_SECRET`: Webhook signing secret (whsk_...)

mod mock_payment_provider;
mod paymongo_adapter;
mod wire;

pub use mock_payment_provider::MockPaymentProvider;
pub use paymongo_adapter::{PaymongoConfig, PaymongoPaymentAdapter, DEFAULT_API_BASE_URL};
