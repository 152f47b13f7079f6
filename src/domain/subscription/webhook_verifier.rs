//! PayMongo webhook signature verification.
//!
//! PayMongo signs `"{t}.{raw body}"` with HMAC-SHA256 and sends the result
//! in the `Paymongo-Signature` header, once per mode:
//! `t=<unix ts>,te=<test hex>,li=<live hex>`.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use super::paymongo_event::{PaymongoEvent, PaymongoEventEnvelope};
use super::webhook_errors::WebhookError;

/// Default maximum age for webhook events (5 minutes).
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Maximum allowed clock skew for future events (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Which signature in the header is authoritative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureMode {
    /// Check `te`.
    Test,
    /// Check `li`.
    Live,
}

impl SignatureMode {
    /// Live keys start with `sk_live_`; everything else is treated as test.
    pub fn for_secret_key(secret_key: &str) -> Self {
        if secret_key.starts_with("sk_live_") {
            SignatureMode::Live
        } else {
            SignatureMode::Test
        }
    }
}

/// Parsed components from the Paymongo-Signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    /// Unix timestamp when the signature was generated.
    pub timestamp: i64,
    /// Test-mode signature, absent or empty for live events.
    pub test_signature: Option<Vec<u8>>,
    /// Live-mode signature, absent or empty for test events.
    pub live_signature: Option<Vec<u8>>,
}

impl SignatureHeader {
    /// Parses a Paymongo-Signature header string.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::ParseError` if the header format is invalid.
    pub fn parse(header: &str) -> Result<Self, WebhookError> {
        let mut timestamp: Option<i64> = None;
        let mut test_signature: Option<Vec<u8>> = None;
        let mut live_signature: Option<Vec<u8>> = None;

        for part in header.split(',') {
            let (key, value) = part
                .trim()
                .split_once('=')
                .ok_or_else(|| WebhookError::ParseError("invalid header format".to_string()))?;

            match key {
                "t" => {
                    timestamp = Some(value.parse().map_err(|_| {
                        WebhookError::ParseError("invalid timestamp".to_string())
                    })?);
                }
                "te" => test_signature = decode_signature(value, "te")?,
                "li" => live_signature = decode_signature(value, "li")?,
                _ => {}
            }
        }

        let timestamp =
            timestamp.ok_or_else(|| WebhookError::ParseError("missing timestamp".to_string()))?;

        Ok(SignatureHeader {
            timestamp,
            test_signature,
            live_signature,
        })
    }

    /// Signature for the given mode, if present.
    pub fn signature_for(&self, mode: SignatureMode) -> Option<&[u8]> {
        match mode {
            SignatureMode::Test => self.test_signature.as_deref(),
            SignatureMode::Live => self.live_signature.as_deref(),
        }
    }
}

fn decode_signature(value: &str, field: &str) -> Result<Option<Vec<u8>>, WebhookError> {
    if value.is_empty() {
        return Ok(None);
    }
    hex::decode(value)
        .map(Some)
        .map_err(|_| WebhookError::ParseError(format!("invalid {} signature hex", field)))
}

/// Verifier for PayMongo webhook signatures.
pub struct PaymongoWebhookVerifier {
    /// Signing secret of the registered webhook (`whsk_...`).
    secret: SecretString,
    mode: SignatureMode,
    tolerance_secs: i64,
}

impl PaymongoWebhookVerifier {
    /// Creates a verifier with the default tolerance window.
    pub fn new(secret: SecretString, mode: SignatureMode) -> Self {
        Self {
            secret,
            mode,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Overrides the maximum accepted event age.
    pub fn with_tolerance_secs(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verifies the webhook signature against the current clock and parses the event.
    pub fn verify_and_parse(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> Result<PaymongoEvent, WebhookError> {
        self.verify_and_parse_at(payload, signature_header, chrono::Utc::now().timestamp())
    }

    /// Verifies the webhook signature as of `now` (Unix seconds) and parses the event.
    ///
    /// # Errors
    ///
    /// - `InvalidSignature` - Signature missing for the mode or mismatched
    /// - `TimestampOutOfRange` - Event is older than the tolerance
    /// - `InvalidTimestamp` - Event timestamp is in the future
    /// - `ParseError` - Failed to parse header or JSON payload
    pub fn verify_and_parse_at(
        &self,
        payload: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<PaymongoEvent, WebhookError> {
        let header = SignatureHeader::parse(signature_header)?;

        self.validate_timestamp(header.timestamp, now)?;

        let provided = header
            .signature_for(self.mode)
            .ok_or(WebhookError::InvalidSignature)?;
        let expected = self.compute_signature(header.timestamp, payload)?;

        if !constant_time_compare(&expected, provided) {
            return Err(WebhookError::InvalidSignature);
        }

        let envelope: PaymongoEventEnvelope = serde_json::from_slice(payload)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        Ok(envelope.data)
    }

    fn validate_timestamp(&self, timestamp: i64, now: i64) -> Result<(), WebhookError> {
        let age = now
            .checked_sub(timestamp)
            .ok_or(WebhookError::InvalidTimestamp)?;

        if age > self.tolerance_secs {
            return Err(WebhookError::TimestampOutOfRange);
        }

        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::InvalidTimestamp);
        }

        Ok(())
    }

    fn compute_signature(&self, timestamp: i64, payload: &[u8]) -> Result<Vec<u8>, WebhookError> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| WebhookError::InvalidSignature)?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes the hex HMAC PayMongo would send, for test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, timestamp: i64, payload: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(format!("{}.{}", timestamp, payload).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
