//! Gallery photos ("Memory Lane").

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    MemorialId, OwnedByUser, PhotoId, Timestamp, UserId, ValidationError,
};

use super::values::MediaRef;

/// Caption stored when the uploader gives none.
pub const DEFAULT_CAPTION: &str = "New photo";

/// Maximum caption length in characters.
pub const MAX_CAPTION_LENGTH: usize = 500;

/// A photo in a memorial's gallery. Only the memorial owner adds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryPhoto {
    pub id: PhotoId,
    pub memorial_id: MemorialId,
    pub owner_id: UserId,
    pub image: MediaRef,
    pub caption: String,
    pub created_at: Timestamp,
}

impl GalleryPhoto {
    /// Creates a gallery photo, defaulting a blank caption.
    pub fn new(
        memorial_id: MemorialId,
        owner_id: UserId,
        image: MediaRef,
        caption: Option<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let caption = caption
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CAPTION.to_string());
        if caption.chars().count() > MAX_CAPTION_LENGTH {
            return Err(ValidationError::too_long("caption", MAX_CAPTION_LENGTH));
        }

        Ok(Self {
            id: PhotoId::new(),
            memorial_id,
            owner_id,
            image,
            caption,
            created_at: now,
        })
    }
}

impl OwnedByUser for GalleryPhoto {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}
