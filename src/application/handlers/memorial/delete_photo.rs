//! DeletePhotoHandler - Command handler for removing a gallery photo.

use std::sync::Arc;

use crate::domain::foundation::{MemorialId, PhotoId, UserId};
use crate::domain::memorial::MemorialError;
use crate::ports::{GalleryRepository, MemorialRepository};

use super::load_owned;

/// Command to delete a photo. The CDN copy is left in place.
#[derive(Debug, Clone)]
pub struct DeletePhotoCommand {
    pub memorial_id: MemorialId,
    pub photo_id: PhotoId,
    pub caller: UserId,
}

/// Handler for deleting gallery photos. Owner only.
pub struct DeletePhotoHandler {
    memorials: Arc<dyn MemorialRepository>,
    gallery: Arc<dyn GalleryRepository>,
}

impl DeletePhotoHandler {
    pub fn new(
        memorials: Arc<dyn MemorialRepository>,
        gallery: Arc<dyn GalleryRepository>,
    ) -> Self {
        Self { memorials, gallery }
    }

    pub async fn handle(&self, cmd: DeletePhotoCommand) -> Result<(), MemorialError> {
        load_owned(self.memorials.as_ref(), &cmd.memorial_id, &cmd.caller).await?;

        if !self.gallery.delete(&cmd.memorial_id, &cmd.photo_id).await? {
            return Err(MemorialError::PhotoNotFound(cmd.photo_id));
        }

        tracing::info!(memorial_id = %cmd.memorial_id, photo_id = %cmd.photo_id, "Photo deleted");
        Ok(())
    }
}
