//! GetMemorialPageHandler - Query handler for a memorial page.

use std::sync::Arc;

use crate::domain::foundation::{MemorialId, OwnedByUser, UserId};
use crate::domain::memorial::{GalleryPhoto, GuestbookEntry, Memorial, MemorialError};
use crate::ports::{GalleryRepository, GuestbookRepository, MemorialRepository};

/// Query for a memorial page. `viewer` is absent for anonymous visitors.
#[derive(Debug, Clone)]
pub struct GetMemorialPageQuery {
    pub memorial_id: MemorialId,
    pub viewer: Option<UserId>,
}

/// Everything rendered on a memorial page.
#[derive(Debug, Clone)]
pub struct MemorialPage {
    pub memorial: Memorial,
    /// Newest first.
    pub photos: Vec<GalleryPhoto>,
    /// Newest first.
    pub entries: Vec<GuestbookEntry>,
    /// True when the viewer owns the memorial.
    pub is_owner: bool,
}

/// Handler for reading memorial pages.
pub struct GetMemorialPageHandler {
    memorials: Arc<dyn MemorialRepository>,
    gallery: Arc<dyn GalleryRepository>,
    guestbook: Arc<dyn GuestbookRepository>,
}

impl GetMemorialPageHandler {
    pub fn new(
        memorials: Arc<dyn MemorialRepository>,
        gallery: Arc<dyn GalleryRepository>,
        guestbook: Arc<dyn GuestbookRepository>,
    ) -> Self {
        Self {
            memorials,
            gallery,
            guestbook,
        }
    }

    pub async fn handle(&self, query: GetMemorialPageQuery) -> Result<MemorialPage, MemorialError> {
        let memorial = self
            .memorials
            .find_by_id(&query.memorial_id)
            .await?
            .filter(|m| m.is_viewable_by(query.viewer.as_ref()))
            .ok_or(MemorialError::not_found(query.memorial_id))?;

        let photos = self.gallery.list_by_memorial(&memorial.id).await?;
        let entries = self.guestbook.list_by_memorial(&memorial.id).await?;
        let is_owner = memorial.is_owned_by(query.viewer.as_ref());

        Ok(MemorialPage {
            memorial,
            photos,
            entries,
            is_owner,
        })
    }
}
