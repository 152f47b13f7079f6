//! Request and response DTOs for memorial endpoints.
//!
//! JSON field names are camelCase to match the web client.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::adapters::http::media::MediaUrls;
use crate::application::handlers::memorial::MemorialPage;
use crate::domain::memorial::{GalleryPhoto, GuestbookEntry, Memorial, ServiceType, Visibility};

/// Distinguishes an absent field from an explicit `null`.
///
/// Absent stays `None` through `#[serde(default)]`; present maps to
/// `Some(value)` where `value` may itself be `None`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a memorial.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemorialRequest {
    #[serde(default)]
    pub name: String,
    pub bio: Option<String>,
    pub service_type: Option<ServiceType>,
    pub visibility: Option<Visibility>,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_passing: Option<NaiveDate>,
    pub image_ref: Option<String>,
}

/// Partial update of a memorial.
///
/// For nullable fields, `null` clears the value and omission leaves it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemorialRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub bio: Option<Option<String>>,
    pub service_type: Option<ServiceType>,
    pub visibility: Option<Visibility>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_of_birth: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub date_of_passing: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub image_ref: Option<Option<String>>,
}

/// Request to add a photo to Memory Lane.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddPhotoRequest {
    #[serde(default)]
    pub image_ref: String,
    pub caption: Option<String>,
}

/// Request to sign the guestbook.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignGuestbookRequest {
    pub author_name: Option<String>,
    #[serde(default)]
    pub message: String,
    pub role: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorialResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub bio: Option<String>,
    pub service_type: ServiceType,
    pub visibility: Visibility,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_passing: Option<NaiveDate>,
    pub image_ref: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MemorialResponse {
    pub fn new(memorial: &Memorial, media: &MediaUrls) -> Self {
        Self {
            id: memorial.id.to_string(),
            owner_id: memorial.owner_id.to_string(),
            name: memorial.name.as_str().to_string(),
            bio: memorial.bio.clone(),
            service_type: memorial.service_type,
            visibility: memorial.visibility,
            date_of_birth: memorial.dates.date_of_birth(),
            date_of_passing: memorial.dates.date_of_passing(),
            image_ref: memorial.image.as_ref().map(|m| m.as_str().to_string()),
            image_url: memorial.image.as_ref().and_then(|m| media.delivery_url(m)),
            created_at: *memorial.created_at.as_datetime(),
            updated_at: *memorial.updated_at.as_datetime(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoResponse {
    pub id: String,
    pub memorial_id: String,
    pub image_ref: String,
    pub image_url: Option<String>,
    pub caption: String,
    pub created_at: DateTime<Utc>,
}

impl PhotoResponse {
    pub fn new(photo: &GalleryPhoto, media: &MediaUrls) -> Self {
        Self {
            id: photo.id.to_string(),
            memorial_id: photo.memorial_id.to_string(),
            image_ref: photo.image.as_str().to_string(),
            image_url: media.delivery_url(&photo.image),
            caption: photo.caption.clone(),
            created_at: *photo.created_at.as_datetime(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestbookEntryResponse {
    pub id: String,
    pub memorial_id: String,
    pub author_id: String,
    pub author_name: String,
    pub message: String,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&GuestbookEntry> for GuestbookEntryResponse {
    fn from(entry: &GuestbookEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            memorial_id: entry.memorial_id.to_string(),
            author_id: entry.author_id.to_string(),
            author_name: entry.author_name.clone(),
            message: entry.message.clone(),
            role: entry.role.clone(),
            created_at: *entry.created_at.as_datetime(),
        }
    }
}

/// Dashboard listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorialListResponse {
    pub memorials: Vec<MemorialResponse>,
}

/// Everything a memorial page renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorialPageResponse {
    pub memorial: MemorialResponse,
    pub photos: Vec<PhotoResponse>,
    pub guestbook: Vec<GuestbookEntryResponse>,
    pub is_owner: bool,
}

impl MemorialPageResponse {
    pub fn new(page: &MemorialPage, media: &MediaUrls) -> Self {
        Self {
            memorial: MemorialResponse::new(&page.memorial, media),
            photos: page.photos.iter().map(|p| PhotoResponse::new(p, media)).collect(),
            guestbook: page.entries.iter().map(GuestbookEntryResponse::from).collect(),
            is_owner: page.is_owner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_distinguishes_null_from_absent() {
        let req: UpdateMemorialRequest =
            serde_json::from_str(r#"{"bio": null, "visibility": "public"}"#).unwrap();

        assert_eq!(req.bio, Some(None));
        assert_eq!(req.image_ref, None);
        assert_eq!(req.visibility, Some(Visibility::Public));
    }

    #[test]
    fn update_request_reads_values() {
        let req: UpdateMemorialRequest =
            serde_json::from_str(r#"{"bio": "Loved by all", "dateOfPassing": "2024-06-01"}"#)
                .unwrap();

        assert_eq!(req.bio, Some(Some("Loved by all".to_string())));
        assert_eq!(
            req.date_of_passing,
            Some(NaiveDate::from_ymd_opt(2024, 6, 1))
        );
    }

    #[test]
    fn create_request_accepts_service_type_labels() {
        let req: CreateMemorialRequest =
            serde_json::from_str(r#"{"name": "Mochi", "serviceType": "PAWS"}"#).unwrap();

        assert_eq!(req.service_type, Some(ServiceType::Paws));
        assert_eq!(req.visibility, None);
    }

    #[test]
    fn create_request_rejects_unknown_visibility() {
        let result: Result<CreateMemorialRequest, _> =
            serde_json::from_str(r#"{"name": "Mochi", "visibility": "unlisted"}"#);
        assert!(result.is_err());
    }
}
