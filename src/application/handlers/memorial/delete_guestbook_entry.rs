//! DeleteGuestbookEntryHandler - Command handler for guestbook moderation.

use std::sync::Arc;

use crate::domain::foundation::{GuestbookEntryId, MemorialId, UserId};
use crate::domain::memorial::MemorialError;
use crate::ports::{GuestbookRepository, MemorialRepository};

use super::load_owned;

/// Command to remove a guestbook entry.
#[derive(Debug, Clone)]
pub struct DeleteGuestbookEntryCommand {
    pub memorial_id: MemorialId,
    pub entry_id: GuestbookEntryId,
    pub caller: UserId,
}

/// Handler for deleting guestbook entries. Only the memorial owner moderates.
pub struct DeleteGuestbookEntryHandler {
    memorials: Arc<dyn MemorialRepository>,
    guestbook: Arc<dyn GuestbookRepository>,
}

impl DeleteGuestbookEntryHandler {
    pub fn new(
        memorials: Arc<dyn MemorialRepository>,
        guestbook: Arc<dyn GuestbookRepository>,
    ) -> Self {
        Self {
            memorials,
            guestbook,
        }
    }

    pub async fn handle(&self, cmd: DeleteGuestbookEntryCommand) -> Result<(), MemorialError> {
        load_owned(self.memorials.as_ref(), &cmd.memorial_id, &cmd.caller).await?;

        if !self.guestbook.delete(&cmd.memorial_id, &cmd.entry_id).await? {
            return Err(MemorialError::EntryNotFound(cmd.entry_id));
        }

        tracing::info!(
            memorial_id = %cmd.memorial_id,
            entry_id = %cmd.entry_id,
            "Guestbook entry removed"
        );
        Ok(())
    }
}
