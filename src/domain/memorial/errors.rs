//! Memorial-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | PhotoNotFound | 404 |
//! | EntryNotFound | 404 |
//! | PaidPlanRequired | 402 |
//! | ValidationFailed | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{
    DomainError, ErrorCode, GuestbookEntryId, MemorialId, PhotoId, ValidationError,
};

/// Message returned when the visibility gate refuses a write.
pub const PAID_PLAN_REQUIRED_MESSAGE: &str = "You must have a paid plan to make a memorial public.";

/// Errors raised by memorial, gallery and guestbook operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemorialError {
    /// Memorial does not exist, or the caller may not see or edit it.
    NotFound(MemorialId),

    /// Photo does not exist on this memorial.
    PhotoNotFound(PhotoId),

    /// Guestbook entry does not exist on this memorial.
    EntryNotFound(GuestbookEntryId),

    /// Publishing needs a subscription that passes the visibility gate.
    PaidPlanRequired,

    /// Input failed validation.
    ValidationFailed { field: String, message: String },

    /// Store failure.
    Infrastructure(String),
}

impl MemorialError {
    pub fn not_found(id: MemorialId) -> Self {
        MemorialError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MemorialError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        MemorialError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            MemorialError::NotFound(_) => ErrorCode::MemorialNotFound,
            MemorialError::PhotoNotFound(_) => ErrorCode::PhotoNotFound,
            MemorialError::EntryNotFound(_) => ErrorCode::GuestbookEntryNotFound,
            MemorialError::PaidPlanRequired => ErrorCode::PaidPlanRequired,
            MemorialError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            MemorialError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns the message shown to API clients.
    pub fn message(&self) -> String {
        match self {
            MemorialError::NotFound(_) => {
                "Memorial not found or you are not the owner".to_string()
            }
            MemorialError::PhotoNotFound(id) => format!("Photo not found: {}", id),
            MemorialError::EntryNotFound(id) => format!("Guestbook entry not found: {}", id),
            MemorialError::PaidPlanRequired => PAID_PLAN_REQUIRED_MESSAGE.to_string(),
            MemorialError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            MemorialError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for MemorialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for MemorialError {}

impl From<ValidationError> for MemorialError {
    fn from(err: ValidationError) -> Self {
        let field = err.field().to_string();
        MemorialError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for MemorialError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::PaidPlanRequired => MemorialError::PaidPlanRequired,
            ErrorCode::ValidationFailed => MemorialError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => MemorialError::Infrastructure(err.to_string()),
        }
    }
}
