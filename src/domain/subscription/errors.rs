//! Subscription-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | MissingPlanOrUser | 400 |
//! | InvalidPlan | 400 |
//! | UserMismatch | 403 |
//! | PaymentFailed | 502 |
//! | NotFound | 404 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised while buying or reading a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionError {
    /// Checkout request lacked a plan or a user id.
    MissingPlanOrUser,

    /// Plan key is unknown or not purchasable.
    InvalidPlan,

    /// Caller tried to start a checkout for someone else.
    UserMismatch,

    /// Payment gateway refused or failed to create a session.
    PaymentFailed { reason: String },

    /// Caller has no subscription row.
    NotFound,

    /// Store failure.
    Infrastructure(String),
}

impl SubscriptionError {
    pub fn payment_failed(reason: impl Into<String>) -> Self {
        SubscriptionError::PaymentFailed {
            reason: reason.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubscriptionError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::MissingPlanOrUser => ErrorCode::ValidationFailed,
            SubscriptionError::InvalidPlan => ErrorCode::InvalidPlan,
            SubscriptionError::UserMismatch => ErrorCode::Forbidden,
            SubscriptionError::PaymentFailed { .. } => ErrorCode::PaymentFailed,
            SubscriptionError::NotFound => ErrorCode::NotFound,
            SubscriptionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns the message shown to API clients.
    pub fn message(&self) -> String {
        match self {
            SubscriptionError::MissingPlanOrUser => "Plan and User ID are required".to_string(),
            SubscriptionError::InvalidPlan => "Invalid plan".to_string(),
            SubscriptionError::UserMismatch => {
                "Cannot start a checkout for another user".to_string()
            }
            SubscriptionError::PaymentFailed { reason } => {
                format!("Payment provider error: {}", reason)
            }
            SubscriptionError::NotFound => "No subscription found".to_string(),
            SubscriptionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for SubscriptionError {}

impl From<DomainError> for SubscriptionError {
    fn from(err: DomainError) -> Self {
        SubscriptionError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_validation_messages_are_stable() {
        assert_eq!(
            SubscriptionError::MissingPlanOrUser.to_string(),
            "Plan and User ID are required"
        );
        assert_eq!(SubscriptionError::InvalidPlan.to_string(), "Invalid plan");
    }

    #[test]
    fn codes_map_by_variant() {
        assert_eq!(SubscriptionError::InvalidPlan.code(), ErrorCode::InvalidPlan);
        assert_eq!(SubscriptionError::UserMismatch.code(), ErrorCode::Forbidden);
        assert_eq!(
            SubscriptionError::payment_failed("timeout").code(),
            ErrorCode::PaymentFailed
        );
    }

    #[test]
    fn domain_error_becomes_infrastructure() {
        let err: SubscriptionError = DomainError::database("pool closed").into();
        assert!(matches!(err, SubscriptionError::Infrastructure(_)));
    }
}
