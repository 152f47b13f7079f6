use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::profile::Profile;
use crate::ports::ProfileRepository;

use super::poisoned;

/// Profiles keyed by user id.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    rows: RwLock<HashMap<UserId, Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn upsert(&self, profile: &Profile) -> Result<(), DomainError> {
        self.rows
            .write()
            .map_err(|_| poisoned())?
            .insert(profile.id.clone(), profile.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.rows.read().map_err(|_| poisoned())?.get(user_id).cloned())
    }
}
