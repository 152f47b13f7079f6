//! Memorial aggregate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{MemorialId, OwnedByUser, Timestamp, UserId, ValidationError};

use super::values::{LifeDates, MediaRef, MemorialName, ServiceType, Visibility};

/// Maximum biography length in characters.
pub const MAX_BIO_LENGTH: usize = 20_000;

/// A memorial page for a person or pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memorial {
    pub id: MemorialId,
    pub owner_id: UserId,
    pub name: MemorialName,
    pub bio: Option<String>,
    pub service_type: ServiceType,
    pub visibility: Visibility,
    pub dates: LifeDates,
    pub image: Option<MediaRef>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Validated input for a new memorial.
#[derive(Debug, Clone)]
pub struct NewMemorial {
    pub name: MemorialName,
    pub bio: Option<String>,
    pub service_type: ServiceType,
    pub visibility: Visibility,
    pub dates: LifeDates,
    pub image: Option<MediaRef>,
}

/// Partial update. `None` leaves a field unchanged; `Some(None)` clears an
/// optional field.
#[derive(Debug, Clone, Default)]
pub struct MemorialChanges {
    pub name: Option<MemorialName>,
    pub bio: Option<Option<String>>,
    pub service_type: Option<ServiceType>,
    pub visibility: Option<Visibility>,
    pub date_of_birth: Option<Option<NaiveDate>>,
    pub date_of_passing: Option<Option<NaiveDate>>,
    pub image: Option<Option<MediaRef>>,
}

impl MemorialChanges {
    /// Returns true if nothing would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.bio.is_none()
            && self.service_type.is_none()
            && self.visibility.is_none()
            && self.date_of_birth.is_none()
            && self.date_of_passing.is_none()
            && self.image.is_none()
    }
}

/// Trims a biography, treating blank text as absent.
pub fn normalize_bio(bio: Option<String>) -> Result<Option<String>, ValidationError> {
    match bio.map(|b| b.trim().to_string()) {
        Some(b) if b.is_empty() => Ok(None),
        Some(b) if b.chars().count() > MAX_BIO_LENGTH => {
            Err(ValidationError::too_long("bio", MAX_BIO_LENGTH))
        }
        other => Ok(other),
    }
}

impl Memorial {
    /// Creates a memorial owned by `owner_id`.
    pub fn create(owner_id: UserId, input: NewMemorial, now: Timestamp) -> Self {
        Self {
            id: MemorialId::new(),
            owner_id,
            name: input.name,
            bio: input.bio,
            service_type: input.service_type,
            visibility: input.visibility,
            dates: input.dates,
            image: input.image,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the memorial as it would look after `changes`.
    ///
    /// Leaves `self` untouched so a rejected update persists nothing.
    pub fn with_changes(
        &self,
        changes: MemorialChanges,
        today: NaiveDate,
        now: Timestamp,
    ) -> Result<Memorial, ValidationError> {
        let date_of_birth = changes
            .date_of_birth
            .unwrap_or_else(|| self.dates.date_of_birth());
        let date_of_passing = changes
            .date_of_passing
            .unwrap_or_else(|| self.dates.date_of_passing());
        let dates = LifeDates::new(date_of_birth, date_of_passing, today)?;

        let bio = match changes.bio {
            Some(bio) => normalize_bio(bio)?,
            None => self.bio.clone(),
        };

        Ok(Memorial {
            id: self.id,
            owner_id: self.owner_id.clone(),
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            bio,
            service_type: changes.service_type.unwrap_or(self.service_type),
            visibility: changes.visibility.unwrap_or(self.visibility),
            dates,
            image: changes.image.unwrap_or_else(|| self.image.clone()),
            created_at: self.created_at,
            updated_at: now,
        })
    }

    /// Returns true if `viewer` may see this page.
    pub fn is_viewable_by(&self, viewer: Option<&UserId>) -> bool {
        self.visibility.is_public() || self.is_owned_by(viewer)
    }
}

impl OwnedByUser for Memorial {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}

#[cfg(test)]
pub(crate) fn test_memorial(owner: &str, visibility: Visibility) -> Memorial {
    Memorial::create(
        UserId::new(owner).unwrap(),
        NewMemorial {
            name: MemorialName::new("Lola Remedios").unwrap(),
            bio: Some("Loved gardening.".to_string()),
            service_type: ServiceType::EternalEcho,
            visibility,
            dates: LifeDates::default(),
            image: None,
        },
        Timestamp::now(),
    )
}
