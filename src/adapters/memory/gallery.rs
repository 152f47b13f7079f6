use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MemorialId, PhotoId};
use crate::domain::memorial::GalleryPhoto;
use crate::ports::GalleryRepository;

use super::{newest_first, poisoned};

/// Gallery photos in insertion order.
#[derive(Default)]
pub struct InMemoryGalleryRepository {
    rows: RwLock<Vec<GalleryPhoto>>,
}

impl InMemoryGalleryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GalleryRepository for InMemoryGalleryRepository {
    async fn insert(&self, photo: &GalleryPhoto) -> Result<(), DomainError> {
        self.rows.write().map_err(|_| poisoned())?.push(photo.clone());
        Ok(())
    }

    async fn list_by_memorial(
        &self,
        memorial_id: &MemorialId,
    ) -> Result<Vec<GalleryPhoto>, DomainError> {
        let rows: Vec<GalleryPhoto> = self
            .rows
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|p| &p.memorial_id == memorial_id)
            .cloned()
            .collect();
        Ok(newest_first(rows, |p| p.created_at))
    }

    async fn delete(
        &self,
        memorial_id: &MemorialId,
        photo_id: &PhotoId,
    ) -> Result<bool, DomainError> {
        let mut rows = self.rows.write().map_err(|_| poisoned())?;
        let before = rows.len();
        rows.retain(|p| !(&p.id == photo_id && &p.memorial_id == memorial_id));
        Ok(rows.len() < before)
    }
}
