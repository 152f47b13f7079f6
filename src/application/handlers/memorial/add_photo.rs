//! AddPhotoHandler - Command handler for adding a gallery photo.

use std::sync::Arc;

use crate::domain::foundation::{MemorialId, Timestamp, UserId};
use crate::domain::memorial::{GalleryPhoto, MediaRef, MemorialError};
use crate::ports::{GalleryRepository, MemorialRepository};

use super::load_owned;

/// Command to add a photo to a memorial's gallery.
#[derive(Debug, Clone)]
pub struct AddPhotoCommand {
    pub memorial_id: MemorialId,
    pub caller: UserId,
    /// Reference returned by the media CDN upload.
    pub image_ref: String,
    pub caption: Option<String>,
}

/// Handler for adding gallery photos. Owner only.
pub struct AddPhotoHandler {
    memorials: Arc<dyn MemorialRepository>,
    gallery: Arc<dyn GalleryRepository>,
}

impl AddPhotoHandler {
    pub fn new(
        memorials: Arc<dyn MemorialRepository>,
        gallery: Arc<dyn GalleryRepository>,
    ) -> Self {
        Self { memorials, gallery }
    }

    pub async fn handle(&self, cmd: AddPhotoCommand) -> Result<GalleryPhoto, MemorialError> {
        let memorial = load_owned(self.memorials.as_ref(), &cmd.memorial_id, &cmd.caller).await?;

        let photo = GalleryPhoto::new(
            memorial.id,
            cmd.caller,
            MediaRef::new(cmd.image_ref)?,
            cmd.caption,
            Timestamp::now(),
        )?;
        self.gallery.insert(&photo).await?;

        tracing::info!(memorial_id = %memorial.id, photo_id = %photo.id, "Photo added");

        Ok(photo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::memorial::test_support::{user, Stores};
    use crate::domain::memorial::{Visibility, DEFAULT_CAPTION};

    fn handler(stores: &Stores) -> AddPhotoHandler {
        AddPhotoHandler::new(stores.memorials.clone(), stores.gallery.clone())
    }

    fn cmd(memorial_id: MemorialId, caller: &str) -> AddPhotoCommand {
        AddPhotoCommand {
            memorial_id,
            caller: user(caller),
            image_ref: "memorials/beach-day".to_string(),
            caption: None,
        }
    }

    #[tokio::test]
    async fn owner_adds_photo_with_default_caption() {
        let stores = Stores::new();
        let memorial = stores.memorial("owner-1", Visibility::Private).await;

        let photo = handler(&stores).handle(cmd(memorial.id, "owner-1")).await.unwrap();

        assert_eq!(photo.caption, DEFAULT_CAPTION);
        assert_eq!(stores.gallery.list_by_memorial(&memorial.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_owner_cannot_add_photo() {
        let stores = Stores::new();
        let memorial = stores.memorial("owner-1", Visibility::Public).await;

        let err = handler(&stores).handle(cmd(memorial.id, "visitor-2")).await.unwrap_err();

        assert_eq!(err, MemorialError::not_found(memorial.id));
        assert!(stores.gallery.list_by_memorial(&memorial.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_image_ref_is_rejected() {
        let stores = Stores::new();
        let memorial = stores.memorial("owner-1", Visibility::Private).await;
        let mut command = cmd(memorial.id, "owner-1");
        command.image_ref = " ".to_string();

        let err = handler(&stores).handle(command).await.unwrap_err();

        assert!(matches!(
            err,
            MemorialError::ValidationFailed { ref field, .. } if field == "image_ref"
        ));
    }
}
