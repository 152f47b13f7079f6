//! Gallery photo repository port.

use crate::domain::foundation::{DomainError, MemorialId, PhotoId};
use crate::domain::memorial::GalleryPhoto;
use async_trait::async_trait;

#[async_trait]
pub trait GalleryRepository: Send + Sync {
    async fn insert(&self, photo: &GalleryPhoto) -> Result<(), DomainError>;

    /// Photos of a memorial, newest first.
    async fn list_by_memorial(
        &self,
        memorial_id: &MemorialId,
    ) -> Result<Vec<GalleryPhoto>, DomainError>;

    /// Delete a photo of the given memorial.
    ///
    /// Returns `false` when the photo does not belong to that memorial.
    /// Media held by the CDN is not reclaimed.
    async fn delete(
        &self,
        memorial_id: &MemorialId,
        photo_id: &PhotoId,
    ) -> Result<bool, DomainError>;
}
