//! UpdateMemorialHandler - Command handler for editing a memorial page.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{MemorialId, Timestamp, UserId};
use crate::domain::memorial::{
    MediaRef, Memorial, MemorialChanges, MemorialError, MemorialName, ServiceType, Visibility,
};
use crate::ports::{MemorialRepository, SubscriptionRepository};

use super::{check_gate, load_owned};

/// Command to partially update a memorial.
///
/// `None` leaves a field unchanged; `Some(None)` clears an optional one.
#[derive(Debug, Clone)]
pub struct UpdateMemorialCommand {
    pub memorial_id: MemorialId,
    pub caller: UserId,
    pub name: Option<String>,
    pub bio: Option<Option<String>>,
    pub service_type: Option<ServiceType>,
    pub visibility: Option<Visibility>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub date_of_passing: Option<Option<NaiveDate>>,
    pub image_ref: Option<Option<String>>,
}

/// Handler for updating memorials.
///
/// A rejected update persists nothing.
pub struct UpdateMemorialHandler {
    memorials: Arc<dyn MemorialRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl UpdateMemorialHandler {
    pub fn new(
        memorials: Arc<dyn MemorialRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            memorials,
            subscriptions,
        }
    }

    pub async fn handle(&self, cmd: UpdateMemorialCommand) -> Result<Memorial, MemorialError> {
        // 1. Caller must own the memorial
        let current = load_owned(self.memorials.as_ref(), &cmd.memorial_id, &cmd.caller).await?;

        // 2. Validate changes
        let changes = MemorialChanges {
            name: cmd.name.map(MemorialName::new).transpose()?,
            bio: cmd.bio,
            service_type: cmd.service_type,
            visibility: cmd.visibility,
            date_of_birth: cmd.date_of_birth,
            date_of_passing: cmd.date_of_passing,
            image: cmd
                .image_ref
                .map(|r| r.map(MediaRef::new).transpose())
                .transpose()?,
        };
        if changes.is_empty() {
            return Ok(current);
        }

        let now = Timestamp::now();
        let updated = current.with_changes(changes, now.date(), now)?;

        // 3. A public result requires a paid plan
        check_gate(self.subscriptions.as_ref(), &updated).await?;

        // 4. Persist
        if !self.memorials.update(&updated).await? {
            return Err(MemorialError::not_found(cmd.memorial_id));
        }

        tracing::info!(
            memorial_id = %updated.id,
            user_id = %updated.owner_id,
            visibility = updated.visibility.as_str(),
            "Memorial updated"
        );

        Ok(updated)
    }
}
