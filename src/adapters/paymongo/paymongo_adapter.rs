//! PayMongo payment provider adapter.
//!
//! Implements the `PaymentProvider` trait against the PayMongo REST API.
//!
//! # Security
//!
//! - The secret key is sent as the basic-auth user name, never logged
//! - Webhook signatures use HMAC-SHA256 with constant-time comparison
//! - Timestamps are validated to prevent replay attacks
//!
//! # Configuration
//!
//! ```ignore
//! let config = PaymongoConfig::new(secret_key, webhook_secret);
//! let adapter = PaymongoPaymentAdapter::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::domain::subscription::webhook_verifier::DEFAULT_TOLERANCE_SECS;
use crate::domain::subscription::{
    PaymongoEvent, PaymongoEventType, PaymongoWebhookVerifier, SignatureMode, WebhookError,
};
use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    WebhookEvent, WebhookEventType,
};

use super::wire::{CheckoutSessionCreateBody, CheckoutSessionResponse, ErrorResponse};

/// Default PayMongo API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.paymongo.com";

/// PayMongo API configuration.
#[derive(Clone)]
pub struct PaymongoConfig {
    /// Secret API key (sk_live_... or sk_test_...).
    secret_key: SecretString,

    /// Webhook signing secret (whsk_...).
    webhook_secret: SecretString,

    /// Base URL for the PayMongo API.
    api_base_url: String,

    /// Maximum accepted webhook age in seconds.
    webhook_tolerance_secs: i64,
}

impl PaymongoConfig {
    /// Create a new PayMongo configuration.
    pub fn new(secret_key: SecretString, webhook_secret: SecretString) -> Self {
        Self {
            secret_key,
            webhook_secret,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            webhook_tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Override the API base URL (for tests or a proxy).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the webhook tolerance window.
    pub fn with_webhook_tolerance_secs(mut self, secs: i64) -> Self {
        self.webhook_tolerance_secs = secs;
        self
    }

    /// Which webhook signature field the key's mode uses.
    pub fn signature_mode(&self) -> SignatureMode {
        SignatureMode::for_secret_key(self.secret_key.expose_secret())
    }
}

/// PayMongo payment adapter.
pub struct PaymongoPaymentAdapter {
    config: PaymongoConfig,
    http_client: reqwest::Client,
    verifier: PaymongoWebhookVerifier,
}

impl PaymongoPaymentAdapter {
    /// Create a new adapter with the given configuration.
    pub fn new(config: PaymongoConfig) -> Self {
        let verifier =
            PaymongoWebhookVerifier::new(config.webhook_secret.clone(), config.signature_mode())
                .with_tolerance_secs(config.webhook_tolerance_secs);

        Self {
            config,
            http_client: reqwest::Client::new(),
            verifier,
        }
    }

    fn to_webhook_event(event: PaymongoEvent) -> WebhookEvent {
        let event_type = match event.parsed_type() {
            PaymongoEventType::CheckoutSessionPaid => WebhookEventType::CheckoutSessionPaid,
            PaymongoEventType::Unknown => {
                WebhookEventType::Other(event.attributes.event_type.clone())
            }
        };

        WebhookEvent {
            metadata: event.checkout_metadata(),
            created_at: event.attributes.created_at,
            id: event.id,
            event_type,
        }
    }
}

#[async_trait]
impl PaymentProvider for PaymongoPaymentAdapter {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let url = format!("{}/v1/checkout_sessions", self.config.api_base_url);
        let body = CheckoutSessionCreateBody::from(request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.secret_key.expose_secret(), Option::<&str>::None)
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error: ErrorResponse = response.json().await.unwrap_or_default();
            let (provider_code, detail) = error.summarize();
            tracing::error!(
                status = status.as_u16(),
                provider_code = ?provider_code,
                "PayMongo create_checkout_session failed"
            );

            let code = match status {
                reqwest::StatusCode::UNAUTHORIZED => PaymentErrorCode::AuthenticationError,
                s if s.is_client_error() => PaymentErrorCode::InvalidRequest,
                _ => PaymentErrorCode::ProviderError,
            };
            let mut err = PaymentError::new(code, format!("PayMongo API error: {}", detail));
            if let Some(provider_code) = provider_code {
                err = err.with_provider_code(provider_code);
            }
            return Err(err);
        }

        let session: CheckoutSessionResponse = response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::InvalidResponse,
                format!("Failed to parse PayMongo response: {}", e),
            )
        })?;

        tracing::info!(session_id = %session.data.id, "PayMongo checkout session created");

        Ok(CheckoutSession {
            id: session.data.id,
            checkout_url: session.data.attributes.checkout_url,
        })
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, WebhookError> {
        let event = self.verifier.verify_and_parse(payload, signature).map_err(|e| {
            tracing::warn!(error = %e, "PayMongo webhook verification failed");
            e
        })?;

        tracing::info!(
            event_id = %event.id,
            event_type = %event.attributes.event_type,
            livemode = event.attributes.livemode,
            "Webhook signature verified"
        );

        Ok(Self::to_webhook_event(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::paymongo_event::checkout_paid_body;
    use crate::domain::subscription::webhook_verifier::compute_test_signature;

    const WEBHOOK_SECRET: &str = "whsk_test_secret";

    fn adapter(secret_key: &str) -> PaymongoPaymentAdapter {
        PaymongoPaymentAdapter::new(PaymongoConfig::new(
            SecretString::new(secret_key.to_string()),
            SecretString::new(WEBHOOK_SECRET.to_string()),
        ))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn config_new_sets_defaults() {
        let config = PaymongoConfig::new(
            SecretString::new("sk_test_x".to_string()),
            SecretString::new("whsk_x".to_string()),
        );
        assert_eq!(config.api_base_url, "https://api.paymongo.com");
        assert_eq!(config.webhook_tolerance_secs, 300);
        assert_eq!(config.signature_mode(), SignatureMode::Test);
    }

    #[test]
    fn config_with_base_url_strips_trailing_slash() {
        let config = PaymongoConfig::new(
            SecretString::new("sk_live_x".to_string()),
            SecretString::new("whsk_x".to_string()),
        )
        .with_base_url("http://localhost:9000/");
        assert_eq!(config.api_base_url, "http://localhost:9000");
        assert_eq!(config.signature_mode(), SignatureMode::Live);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Webhook Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn verify_webhook_maps_paid_event() {
        let now = chrono::Utc::now().timestamp();
        let body = checkout_paid_body(
            "checkout_session.payment.paid",
            now,
            serde_json::json!({"user_id": "user-1", "plan": "evermore"}),
        );
        let signature = compute_test_signature(WEBHOOK_SECRET, now, &body);
        let header = format!("t={},te={},li=", now, signature);

        let event = adapter("sk_test_key")
            .verify_webhook(body.as_bytes(), &header)
            .await
            .unwrap();

        assert_eq!(event.event_type, WebhookEventType::CheckoutSessionPaid);
        assert_eq!(event.metadata.user_id.as_deref(), Some("user-1"));
        assert_eq!(event.metadata.plan.as_deref(), Some("evermore"));
        assert_eq!(event.created_at, now);
    }

    #[tokio::test]
    async fn verify_webhook_keeps_unknown_type_name() {
        let now = chrono::Utc::now().timestamp();
        let body = checkout_paid_body("payment.refunded", now, serde_json::json!({}));
        let header = format!("t={},te={}", now, compute_test_signature(WEBHOOK_SECRET, now, &body));

        let event = adapter("sk_test_key")
            .verify_webhook(body.as_bytes(), &header)
            .await
            .unwrap();

        assert_eq!(event.event_type, WebhookEventType::Other("payment.refunded".to_string()));
    }

    #[tokio::test]
    async fn live_key_requires_live_signature() {
        let now = chrono::Utc::now().timestamp();
        let body = checkout_paid_body("checkout_session.payment.paid", now, serde_json::json!({}));
        let signature = compute_test_signature(WEBHOOK_SECRET, now, &body);
        let header = format!("t={},te={},li=", now, signature);

        let result = adapter("sk_live_key").verify_webhook(body.as_bytes(), &header).await;

        assert_eq!(result.unwrap_err(), WebhookError::InvalidSignature);
    }
}
