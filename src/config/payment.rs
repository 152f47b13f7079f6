//! Payment configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration (PayMongo)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// PayMongo secret API key (`sk_test_...` or `sk_live_...`)
    pub secret_key: SecretString,

    /// Webhook signing secret (`whsk_...`)
    pub webhook_secret: SecretString,

    /// API base URL override, for sandboxes and tests
    pub api_base_url: Option<String>,

    /// Maximum age of a webhook signature timestamp
    #[serde(default = "default_webhook_tolerance")]
    pub webhook_tolerance_secs: i64,
}

impl PaymentConfig {
    /// Check if using PayMongo test mode
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.expose_secret().starts_with("sk_test_")
    }

    /// Check if using PayMongo live mode
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.expose_secret().starts_with("sk_live_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret_key = self.secret_key.expose_secret();
        let webhook_secret = self.webhook_secret.expose_secret();

        if secret_key.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__SECRET_KEY"));
        }
        if webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__WEBHOOK_SECRET"));
        }
        if !secret_key.starts_with("sk_") {
            return Err(ValidationError::InvalidPaymongoKey);
        }
        if !webhook_secret.starts_with("whsk_") {
            return Err(ValidationError::InvalidPaymongoWebhookSecret);
        }
        if self.webhook_tolerance_secs <= 0 {
            return Err(ValidationError::InvalidWebhookTolerance);
        }
        Ok(())
    }
}

fn default_webhook_tolerance() -> i64 {
    300
}
