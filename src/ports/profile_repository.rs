//! ProfileRepository port for profile persistence operations

use async_trait::async_trait;

use crate::domain::{
    foundation::{DomainError, UserId},
    profile::Profile,
};

/// Repository for user profiles.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Insert or replace the profile keyed by `profile.id`.
    async fn upsert(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Find profile by user ID
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;
}
