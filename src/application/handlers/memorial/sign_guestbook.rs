//! SignGuestbookHandler - Command handler for leaving a Letter of Love.

use std::sync::Arc;

use crate::domain::foundation::{AuthenticatedUser, MemorialId, Timestamp};
use crate::domain::memorial::{GuestbookEntry, MemorialError};
use crate::ports::{GuestbookRepository, MemorialRepository};

/// Command to sign a memorial's guestbook.
#[derive(Debug, Clone)]
pub struct SignGuestbookCommand {
    pub memorial_id: MemorialId,
    pub author: AuthenticatedUser,
    /// Falls back to the author's display name or email when blank.
    pub author_name: Option<String>,
    pub message: String,
    pub role: Option<String>,
}

/// Handler for signing guestbooks.
///
/// Any signed-in user who can view the memorial may sign it.
pub struct SignGuestbookHandler {
    memorials: Arc<dyn MemorialRepository>,
    guestbook: Arc<dyn GuestbookRepository>,
}

impl SignGuestbookHandler {
    pub fn new(
        memorials: Arc<dyn MemorialRepository>,
        guestbook: Arc<dyn GuestbookRepository>,
    ) -> Self {
        Self {
            memorials,
            guestbook,
        }
    }

    pub async fn handle(&self, cmd: SignGuestbookCommand) -> Result<GuestbookEntry, MemorialError> {
        let memorial = self
            .memorials
            .find_by_id(&cmd.memorial_id)
            .await?
            .filter(|m| m.is_viewable_by(Some(&cmd.author.id)))
            .ok_or(MemorialError::not_found(cmd.memorial_id))?;

        let author_name = cmd
            .author_name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| cmd.author.display_name_or_email().map(str::to_string))
            .unwrap_or_default();

        let entry = GuestbookEntry::new(
            memorial.id,
            cmd.author.id,
            author_name,
            cmd.message,
            cmd.role,
            Timestamp::now(),
        )?;
        self.guestbook.insert(&entry).await?;

        tracing::info!(
            memorial_id = %memorial.id,
            entry_id = %entry.id,
            user_id = %entry.author_id,
            "Guestbook signed"
        );

        Ok(entry)
    }
}
