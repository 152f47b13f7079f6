//! Guestbook entries ("Letters of Love").

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{GuestbookEntryId, MemorialId, Timestamp, UserId, ValidationError};

/// Maximum author name length in characters.
pub const MAX_AUTHOR_NAME_LENGTH: usize = 100;

/// Maximum message length in characters.
pub const MAX_MESSAGE_LENGTH: usize = 5_000;

/// Maximum role length in characters.
pub const MAX_ROLE_LENGTH: usize = 100;

/// A letter left on a memorial by an authenticated visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookEntry {
    pub id: GuestbookEntryId,
    pub memorial_id: MemorialId,
    pub author_id: UserId,
    pub author_name: String,
    pub message: String,
    /// Relationship to the deceased, e.g. "Granddaughter".
    pub role: Option<String>,
    pub created_at: Timestamp,
}

impl GuestbookEntry {
    /// Creates an entry; author name and message must be non-blank.
    pub fn new(
        memorial_id: MemorialId,
        author_id: UserId,
        author_name: impl Into<String>,
        message: impl Into<String>,
        role: Option<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let author_name = required(author_name.into(), "author_name", MAX_AUTHOR_NAME_LENGTH)?;
        let message = required(message.into(), "message", MAX_MESSAGE_LENGTH)?;
        let role = match role.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()) {
            Some(r) if r.chars().count() > MAX_ROLE_LENGTH => {
                return Err(ValidationError::too_long("role", MAX_ROLE_LENGTH))
            }
            other => other,
        };

        Ok(Self {
            id: GuestbookEntryId::new(),
            memorial_id,
            author_id,
            author_name,
            message,
            role,
            created_at: now,
        })
    }
}

fn required(value: String, field: &str, max: usize) -> Result<String, ValidationError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    if value.chars().count() > max {
        return Err(ValidationError::too_long(field, max));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(
        name: &str,
        message: &str,
        role: Option<&str>,
    ) -> Result<GuestbookEntry, ValidationError> {
        GuestbookEntry::new(
            MemorialId::new(),
            UserId::new("visitor-1").unwrap(),
            name,
            message,
            role.map(str::to_string),
            Timestamp::now(),
        )
    }

    #[test]
    fn valid_entry_is_trimmed() {
        let e = entry(" Ana ", " We miss you. ", Some(" Niece ")).unwrap();
        assert_eq!(e.author_name, "Ana");
        assert_eq!(e.message, "We miss you.");
        assert_eq!(e.role.as_deref(), Some("Niece"));
    }

    #[test]
    fn blank_author_name_is_rejected() {
        let err = entry("  ", "Hello", None).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("author_name"));
    }

    #[test]
    fn blank_message_is_rejected() {
        let err = entry("Ana", "\n\t", None).unwrap_err();
        assert_eq!(err, ValidationError::empty_field("message"));
    }

    #[test]
    fn blank_role_becomes_none() {
        assert_eq!(entry("Ana", "Hi", Some(" ")).unwrap().role, None);
    }

    #[test]
    fn overlong_message_is_rejected() {
        let long = "x".repeat(MAX_MESSAGE_LENGTH + 1);
        assert_eq!(
            entry("Ana", &long, None).unwrap_err(),
            ValidationError::too_long("message", MAX_MESSAGE_LENGTH)
        );
    }
}
