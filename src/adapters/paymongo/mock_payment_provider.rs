//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::subscription::WebhookError;
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider, WebhookEvent,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
/// mock.set_error(PaymentError::network("Test outage"));
/// let result = mock.create_checkout_session(request).await;
/// assert_eq!(mock.checkout_requests().len(), 1);
/// ```
#[derive(Default, Clone)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Session to return from the next checkout.
    next_checkout: Option<CheckoutSession>,

    /// Event to return from the next verification.
    next_webhook_event: Option<WebhookEvent>,

    /// Error to return from the next checkout.
    next_error: Option<PaymentError>,

    /// Every checkout request received.
    checkout_requests: Vec<CreateCheckoutRequest>,

    /// Number of webhook verifications attempted.
    webhook_calls: usize,

    reject_webhooks: bool,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all webhook verifications.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.state().reject_webhooks = true;
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set the session to return on the next `create_checkout_session` call.
    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.state().next_checkout = Some(session);
    }

    /// Set the event to return on the next `verify_webhook` call.
    pub fn set_webhook_event(&self, event: WebhookEvent) {
        self.state().next_webhook_event = Some(event);
    }

    /// Fail the next `create_checkout_session` call.
    pub fn set_error(&self, error: PaymentError) {
        self.state().next_error = Some(error);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Assertions
    // ════════════════════════════════════════════════════════════════════════════

    /// Checkout requests received so far.
    pub fn checkout_requests(&self) -> Vec<CreateCheckoutRequest> {
        self.state().checkout_requests.clone()
    }

    /// Number of webhook verifications attempted.
    pub fn webhook_calls(&self) -> usize {
        self.state().webhook_calls
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let mut state = self.state();
        state.checkout_requests.push(request);

        if let Some(err) = state.next_error.take() {
            return Err(err);
        }

        let number = state.checkout_requests.len();
        Ok(state.next_checkout.take().unwrap_or_else(|| CheckoutSession {
            id: format!("cs_mock_{}", number),
            checkout_url: format!("https://checkout.paymongo.test/cs_mock_{}", number),
        }))
    }

    async fn verify_webhook(
        &self,
        _payload: &[u8],
        _signature: &str,
    ) -> Result<WebhookEvent, WebhookError> {
        let mut state = self.state();
        state.webhook_calls += 1;

        if state.reject_webhooks {
            return Err(WebhookError::InvalidSignature);
        }

        state
            .next_webhook_event
            .clone()
            .ok_or_else(|| WebhookError::ParseError("no mock event configured".to_string()))
    }
}
