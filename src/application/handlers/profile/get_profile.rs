//! GetProfileHandler - Query handler for the caller's profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::profile::Profile;
use crate::ports::ProfileRepository;

/// Query for a user's profile.
#[derive(Debug, Clone)]
pub struct GetProfileQuery {
    pub user_id: UserId,
}

/// Handler for reading profiles.
pub struct GetProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl GetProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Fails with `ProfileNotFound` until the first save.
    pub async fn handle(&self, query: GetProfileQuery) -> Result<Profile, DomainError> {
        self.profiles
            .find_by_user(&query.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::ProfileNotFound, "Profile not found")
                    .with_detail("user_id", query.user_id.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryProfileRepository;
    use crate::domain::foundation::Timestamp;

    #[tokio::test]
    async fn unsaved_profile_is_not_found() {
        let handler = GetProfileHandler::new(Arc::new(InMemoryProfileRepository::new()));

        let err = handler
            .handle(GetProfileQuery {
                user_id: UserId::new("user-1").unwrap(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ProfileNotFound);
    }

    #[tokio::test]
    async fn saved_profile_is_returned() {
        let repo = Arc::new(InMemoryProfileRepository::new());
        let user = UserId::new("user-1").unwrap();
        let profile = Profile::save(
            user.clone(),
            Some("Ana Reyes".to_string()),
            None,
            Timestamp::now(),
        )
        .unwrap();
        repo.upsert(&profile).await.unwrap();

        let found = GetProfileHandler::new(repo)
            .handle(GetProfileQuery { user_id: user })
            .await
            .unwrap();

        assert_eq!(found, profile);
    }
}
