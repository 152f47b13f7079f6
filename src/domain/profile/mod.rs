//! User profile.
//!
//! One row per identity, created lazily on first save.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};
use crate::domain::memorial::MediaRef;

/// Maximum full name length in characters.
pub const MAX_FULL_NAME_LENGTH: usize = 100;

/// Display details of a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Same as the identity provider's user id.
    pub id: UserId,
    pub full_name: Option<String>,
    pub avatar: Option<MediaRef>,
    pub updated_at: Timestamp,
}

impl Profile {
    /// Builds the row written by a save; blank names are stored as absent.
    pub fn save(
        id: UserId,
        full_name: Option<String>,
        avatar: Option<MediaRef>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let full_name = full_name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        if let Some(name) = &full_name {
            if name.chars().count() > MAX_FULL_NAME_LENGTH {
                return Err(ValidationError::too_long("full_name", MAX_FULL_NAME_LENGTH));
            }
        }

        Ok(Self {
            id,
            full_name,
            avatar,
            updated_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("user-1").unwrap()
    }

    #[test]
    fn save_trims_name() {
        let name = Some(" Ana Reyes ".to_string());
        let profile = Profile::save(user(), name, None, Timestamp::now()).unwrap();
        assert_eq!(profile.full_name.as_deref(), Some("Ana Reyes"));
    }

    #[test]
    fn blank_name_is_stored_as_none() {
        let name = Some("  ".to_string());
        let profile = Profile::save(user(), name, None, Timestamp::now()).unwrap();
        assert_eq!(profile.full_name, None);
    }

    #[test]
    fn overlong_name_is_rejected() {
        let result = Profile::save(user(), Some("x".repeat(101)), None, Timestamp::now());
        assert_eq!(
            result.unwrap_err(),
            ValidationError::too_long("full_name", MAX_FULL_NAME_LENGTH)
        );
    }

    #[test]
    fn avatar_is_kept() {
        let avatar = MediaRef::new("avatars/user-1").unwrap();
        let profile = Profile::save(user(), None, Some(avatar.clone()), Timestamp::now()).unwrap();
        assert_eq!(profile.avatar, Some(avatar));
    }
}
