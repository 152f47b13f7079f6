//! Webhook error types for PayMongo webhook handling.

use thiserror::Error;

/// Errors that occur during webhook processing.
///
/// Every variant is answered with 400; the gateway owns redelivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    /// `Paymongo-Signature` header was absent.
    #[error("Missing Paymongo-Signature header")]
    MissingSignature,

    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Webhook timestamp is older than the tolerance window.
    #[error("Timestamp out of range")]
    TimestampOutOfRange,

    /// Event timestamp is in the future beyond clock skew tolerance.
    #[error("Invalid timestamp")]
    InvalidTimestamp,

    /// Failed to parse webhook payload or signature header.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Store operation failed.
    #[error("Database error: {0}")]
    Database(String),
}

impl WebhookError {
    /// Returns true if the delivery itself was unacceptable, as opposed
    /// to a failure on our side.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, WebhookError::Database(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_signature_displays_correctly() {
        assert_eq!(WebhookError::InvalidSignature.to_string(), "Invalid signature");
    }

    #[test]
    fn parse_error_displays_message() {
        let err = WebhookError::ParseError("invalid JSON".to_string());
        assert_eq!(err.to_string(), "Parse error: invalid JSON");
    }

    #[test]
    fn database_error_is_not_a_rejection() {
        assert!(!WebhookError::Database("connection lost".to_string()).is_rejection());
        assert!(WebhookError::InvalidSignature.is_rejection());
        assert!(WebhookError::MissingSignature.is_rejection());
    }
}
