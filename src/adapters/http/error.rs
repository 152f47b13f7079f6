//! API error type and its HTTP mapping.
//!
//! | Source | HTTP Status |
//! |--------|-------------|
//! | Memorial not found (or not owned) | 404 |
//! | Visibility gate refusal | 402 |
//! | Validation / malformed body | 400 |
//! | Checkout user mismatch | 403 |
//! | Payment gateway failure | 502 |
//! | Any webhook failure | 400 |
//! | Store failure | 500 |

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::memorial::MemorialError;
use crate::domain::subscription::{SubscriptionError, WebhookError};

/// JSON error body: `{"error": "...", "code": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Error code for programmatic handling.
    pub code: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Error returned by every HTTP handler.
#[derive(Debug)]
pub enum ApiError {
    Memorial(MemorialError),
    Subscription(SubscriptionError),
    Webhook(WebhookError),
    Domain(DomainError),
    /// Request body was not valid JSON for the endpoint.
    InvalidBody(String),
    /// Path segment did not name a resource.
    NotFound(String),
}

impl From<MemorialError> for ApiError {
    fn from(err: MemorialError) -> Self {
        ApiError::Memorial(err)
    }
}

impl From<SubscriptionError> for ApiError {
    fn from(err: SubscriptionError) -> Self {
        ApiError::Subscription(err)
    }
}

impl From<WebhookError> for ApiError {
    fn from(err: WebhookError) -> Self {
        ApiError::Webhook(err)
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

const INTERNAL_MESSAGE: &str = "Internal server error";

fn status_for_code(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::InvalidPlan => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound
        | ErrorCode::MemorialNotFound
        | ErrorCode::PhotoNotFound
        | ErrorCode::GuestbookEntryNotFound
        | ErrorCode::ProfileNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::PaidPlanRequired => StatusCode::PAYMENT_REQUIRED,
        ErrorCode::PaymentFailed => StatusCode::BAD_GATEWAY,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::Memorial(err) => {
                (status_for_code(err.code()), body(err.code(), err.message()))
            }
            ApiError::Subscription(err) => {
                (status_for_code(err.code()), body(err.code(), err.message()))
            }
            ApiError::Domain(err) => {
                (status_for_code(err.code), body(err.code, err.message.clone()))
            }
            ApiError::Webhook(err) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("WEBHOOK_ERROR", format!("Webhook Error: {}", err)),
            ),
            ApiError::InvalidBody(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), message.clone()),
            ),
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(ErrorCode::NotFound.to_string(), message.clone()),
            ),
        }
    }
}

fn body(code: ErrorCode, message: String) -> ErrorResponse {
    if status_for_code(code) == StatusCode::INTERNAL_SERVER_ERROR {
        ErrorResponse::new(code.to_string(), INTERNAL_MESSAGE)
    } else {
        ErrorResponse::new(code.to_string(), message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();

        match &self {
            ApiError::Webhook(err) if !err.is_rejection() => {
                tracing::error!(error = %err, "Webhook processing failed");
            }
            ApiError::Webhook(err) => {
                tracing::warn!(error = %err, "Webhook rejected");
            }
            _ if status.is_server_error() => {
                tracing::error!(status = status.as_u16(), error = ?self, "Request failed");
            }
            _ => {
                tracing::debug!(status = status.as_u16(), error = %body.error, "Request rejected");
            }
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::MemorialId;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn memorial_errors_map_to_expected_statuses() {
        assert_eq!(status_of(MemorialError::not_found(MemorialId::new())), StatusCode::NOT_FOUND);
        assert_eq!(status_of(MemorialError::PaidPlanRequired), StatusCode::PAYMENT_REQUIRED);
        assert_eq!(status_of(MemorialError::validation("name", "empty")), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(MemorialError::infrastructure("db down")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn subscription_errors_map_to_expected_statuses() {
        assert_eq!(status_of(SubscriptionError::MissingPlanOrUser), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(SubscriptionError::InvalidPlan), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(SubscriptionError::UserMismatch), StatusCode::FORBIDDEN);
        assert_eq!(
            status_of(SubscriptionError::payment_failed("timeout")),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn every_webhook_error_is_bad_request() {
        for err in [
            WebhookError::MissingSignature,
            WebhookError::InvalidSignature,
            WebhookError::ParseError("eof".to_string()),
            WebhookError::Database("pool closed".to_string()),
        ] {
            assert_eq!(status_of(err), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn webhook_body_is_prefixed() {
        let (_, body) = ApiError::Webhook(WebhookError::InvalidSignature).parts();
        assert_eq!(body.error, "Webhook Error: Invalid signature");
    }

    #[test]
    fn gate_refusal_carries_paid_plan_message() {
        let (status, body) = ApiError::Memorial(MemorialError::PaidPlanRequired).parts();
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body.error, "You must have a paid plan to make a memorial public.");
        assert_eq!(body.code, "PAID_PLAN_REQUIRED");
    }

    #[test]
    fn store_failures_hide_details() {
        let err = DomainError::database("connection refused: 10.0.0.3");
        let (_, body) = ApiError::Domain(err).parts();
        assert_eq!(body.error, "Internal server error");
    }

    #[test]
    fn profile_not_found_is_404() {
        let err = DomainError::new(ErrorCode::ProfileNotFound, "Profile not found");
        assert_eq!(status_of(err), StatusCode::NOT_FOUND);
    }
}
