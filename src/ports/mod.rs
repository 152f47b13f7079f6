//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Store Ports
//!
//! - `MemorialRepository` - Memorial pages, with the visibility gate in the write path
//! - `GalleryRepository` - Memory Lane photos
//! - `GuestbookRepository` - Letters of Love
//! - `ProfileRepository` - Per-user display details
//! - `SubscriptionRepository` - Plan entitlements
//!
//! ## Collaborator Ports
//!
//! - `PaymentProvider` - Hosted checkout and webhook verification
//! - `SessionValidator` - Bearer token validation

mod gallery_repository;
mod guestbook_repository;
mod memorial_repository;
mod payment_provider;
mod profile_repository;
mod session_validator;
mod subscription_repository;

pub use gallery_repository::GalleryRepository;
pub use guestbook_repository::GuestbookRepository;
pub use memorial_repository::MemorialRepository;
pub use payment_provider::{
    CheckoutLineItem, CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode,
    PaymentMethodType, PaymentProvider, WebhookEvent, WebhookEventType,
};
pub use profile_repository::ProfileRepository;
pub use session_validator::SessionValidator;
pub use subscription_repository::SubscriptionRepository;
