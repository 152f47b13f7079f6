//! CreateMemorialHandler - Command handler for creating a memorial page.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::foundation::{Timestamp, UserId};
use crate::domain::memorial::{
    normalize_bio, LifeDates, MediaRef, Memorial, MemorialError, MemorialName, NewMemorial,
    ServiceType, Visibility,
};
use crate::ports::{MemorialRepository, SubscriptionRepository};

use super::check_gate;

/// Command to create a memorial.
#[derive(Debug, Clone)]
pub struct CreateMemorialCommand {
    pub owner_id: UserId,
    pub name: String,
    pub bio: Option<String>,
    /// Defaults to `ETERNAL ECHO`.
    pub service_type: Option<ServiceType>,
    /// Defaults to private.
    pub visibility: Option<Visibility>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_passing: Option<NaiveDate>,
    pub image_ref: Option<String>,
}

/// Handler for creating memorials.
pub struct CreateMemorialHandler {
    memorials: Arc<dyn MemorialRepository>,
    subscriptions: Arc<dyn SubscriptionRepository>,
}

impl CreateMemorialHandler {
    pub fn new(
        memorials: Arc<dyn MemorialRepository>,
        subscriptions: Arc<dyn SubscriptionRepository>,
    ) -> Self {
        Self {
            memorials,
            subscriptions,
        }
    }

    pub async fn handle(&self, cmd: CreateMemorialCommand) -> Result<Memorial, MemorialError> {
        let now = Timestamp::now();

        // 1. Validate input
        let input = NewMemorial {
            name: MemorialName::new(cmd.name)?,
            bio: normalize_bio(cmd.bio)?,
            service_type: cmd.service_type.unwrap_or_default(),
            visibility: cmd.visibility.unwrap_or_default(),
            dates: LifeDates::new(cmd.date_of_birth, cmd.date_of_passing, now.date())?,
            image: cmd.image_ref.map(MediaRef::new).transpose()?,
        };
        let memorial = Memorial::create(cmd.owner_id, input, now);

        // 2. Publishing requires a paid plan
        check_gate(self.subscriptions.as_ref(), &memorial).await?;

        // 3. Persist
        self.memorials.insert(&memorial).await?;

        tracing::info!(
            memorial_id = %memorial.id,
            user_id = %memorial.owner_id,
            visibility = memorial.visibility.as_str(),
            "Memorial created"
        );

        Ok(memorial)
    }
}
