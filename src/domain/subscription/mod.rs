//! Subscription domain module.
//!
//! Plans, the checkout price table, and the activation written when a
//! PayMongo checkout is paid.
//!
//! # Module Structure
//!
//! - `plan` - Plan enum and price table
//! - `status` - SubscriptionStatus values
//! - `aggregate` - Subscription row and Activation
//! - `expiry` - Term arithmetic
//! - `webhook_verifier` - Paymongo-Signature verification

mod aggregate;
mod errors;
mod expiry;
mod plan;
mod status;

pub mod paymongo_event;
pub mod webhook_errors;
pub mod webhook_verifier;

pub use aggregate::{Activation, Subscription};
pub use errors::SubscriptionError;
pub use expiry::expiry_for;
pub use paymongo_event::{CheckoutMetadata, PaymongoEvent, PaymongoEventType};
pub use plan::{Plan, PlanPrice};
pub use status::SubscriptionStatus;
pub use webhook_errors::WebhookError;
pub use webhook_verifier::{PaymongoWebhookVerifier, SignatureHeader, SignatureMode};
