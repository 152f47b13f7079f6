//! PostgreSQL implementation of GalleryRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, MemorialId, PhotoId, Timestamp};
use crate::domain::memorial::{GalleryPhoto, MediaRef};
use crate::ports::GalleryRepository;

use super::{corrupt, db_error, parse_user_id};

pub struct PostgresGalleryRepository {
    pool: PgPool,
}

impl PostgresGalleryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GalleryPhotoRow {
    id: Uuid,
    memorial_id: Uuid,
    owner_id: String,
    image_ref: String,
    caption: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<GalleryPhotoRow> for GalleryPhoto {
    type Error = DomainError;

    fn try_from(row: GalleryPhotoRow) -> Result<Self, Self::Error> {
        Ok(GalleryPhoto {
            id: PhotoId::from_uuid(row.id),
            memorial_id: MemorialId::from_uuid(row.memorial_id),
            owner_id: parse_user_id("owner_id", row.owner_id)?,
            image: MediaRef::new(row.image_ref).map_err(|e| corrupt("image_ref", e))?,
            caption: row.caption,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl GalleryRepository for PostgresGalleryRepository {
    async fn insert(&self, photo: &GalleryPhoto) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO gallery_photos (id, memorial_id, owner_id, image_ref, caption, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(photo.id.as_uuid())
        .bind(photo.memorial_id.as_uuid())
        .bind(photo.owner_id.as_str())
        .bind(photo.image.as_str())
        .bind(&photo.caption)
        .bind(photo.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert photo", e))?;

        Ok(())
    }

    async fn list_by_memorial(
        &self,
        memorial_id: &MemorialId,
    ) -> Result<Vec<GalleryPhoto>, DomainError> {
        let rows: Vec<GalleryPhotoRow> = sqlx::query_as(
            r#"
            SELECT id, memorial_id, owner_id, image_ref, caption, created_at
            FROM gallery_photos
            WHERE memorial_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(memorial_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list photos", e))?;

        rows.into_iter().map(GalleryPhoto::try_from).collect()
    }

    async fn delete(
        &self,
        memorial_id: &MemorialId,
        photo_id: &PhotoId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM gallery_photos WHERE id = $1 AND memorial_id = $2")
            .bind(photo_id.as_uuid())
            .bind(memorial_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete photo", e))?;

        Ok(result.rows_affected() > 0)
    }
}
