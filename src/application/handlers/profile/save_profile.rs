//! SaveProfileHandler - Command handler for creating or updating a profile.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::memorial::MediaRef;
use crate::domain::profile::Profile;
use crate::ports::ProfileRepository;

/// Command to save the caller's profile.
#[derive(Debug, Clone)]
pub struct SaveProfileCommand {
    pub user_id: UserId,
    pub full_name: Option<String>,
    /// Avatar reference from the media CDN; blank clears it.
    pub avatar_ref: Option<String>,
}

/// Handler for saving profiles. The first save creates the row.
pub struct SaveProfileHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl SaveProfileHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, cmd: SaveProfileCommand) -> Result<Profile, DomainError> {
        let avatar = cmd
            .avatar_ref
            .filter(|r| !r.trim().is_empty())
            .map(MediaRef::new)
            .transpose()?;
        let profile = Profile::save(cmd.user_id, cmd.full_name, avatar, Timestamp::now())?;

        self.profiles.upsert(&profile).await?;

        tracing::info!(user_id = %profile.id, "Profile saved");
        Ok(profile)
    }
}
