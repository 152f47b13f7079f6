//! Value objects for memorial pages.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Maximum length of a memorial name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a media reference.
pub const MAX_MEDIA_REF_LENGTH: usize = 2048;

/// Who can see a memorial page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Owner only.
    #[default]
    Private,
    /// Anyone with the link. Requires a paid plan.
    Public,
}

impl Visibility {
    pub fn is_public(&self) -> bool {
        matches!(self, Visibility::Public)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Private => "private",
            Visibility::Public => "public",
        }
    }
}

impl FromStr for Visibility {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Visibility::Private),
            "public" => Ok(Visibility::Public),
            _ => Err(ValidationError::invalid_format(
                "visibility",
                "must be 'private' or 'public'",
            )),
        }
    }
}

/// Kind of memorial service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ServiceType {
    /// Memorial for a person.
    #[default]
    #[serde(rename = "ETERNAL ECHO")]
    EternalEcho,
    /// Memorial for a pet.
    #[serde(rename = "PAWS")]
    Paws,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::EternalEcho => "ETERNAL ECHO",
            ServiceType::Paws => "PAWS",
        }
    }
}

impl FromStr for ServiceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ETERNAL ECHO" => Ok(ServiceType::EternalEcho),
            "PAWS" => Ok(ServiceType::Paws),
            _ => Err(ValidationError::invalid_format(
                "service_type",
                "must be 'ETERNAL ECHO' or 'PAWS'",
            )),
        }
    }
}

/// Non-empty display name of the person or pet remembered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MemorialName(String);

impl MemorialName {
    /// Trims and validates a name.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::too_long("name", MAX_NAME_LENGTH));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for MemorialName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MemorialName::new(value)
    }
}

impl From<MemorialName> for String {
    fn from(name: MemorialName) -> Self {
        name.0
    }
}

/// Reference to an image held by the media CDN.
///
/// Either a public id (`memorials/abc123`) or a full delivery URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaRef(String);

impl MediaRef {
    pub fn new(reference: impl Into<String>) -> Result<Self, ValidationError> {
        let reference = reference.into().trim().to_string();
        if reference.is_empty() {
            return Err(ValidationError::empty_field("image_ref"));
        }
        if reference.len() > MAX_MEDIA_REF_LENGTH {
            return Err(ValidationError::too_long("image_ref", MAX_MEDIA_REF_LENGTH));
        }
        Ok(Self(reference))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the reference is already a full URL.
    pub fn is_url(&self) -> bool {
        self.0.starts_with("https://") || self.0.starts_with("http://")
    }
}

impl TryFrom<String> for MediaRef {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        MediaRef::new(value)
    }
}

impl From<MediaRef> for String {
    fn from(media: MediaRef) -> Self {
        media.0
    }
}

/// Birth and passing dates, each optional.
///
/// When present: birth <= passing <= today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifeDates {
    date_of_birth: Option<NaiveDate>,
    date_of_passing: Option<NaiveDate>,
}

impl LifeDates {
    /// Validates the dates against each other and against `today`.
    pub fn new(
        date_of_birth: Option<NaiveDate>,
        date_of_passing: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        if let Some(birth) = date_of_birth {
            if birth > today {
                return Err(ValidationError::invalid_format(
                    "date_of_birth",
                    "cannot be in the future",
                ));
            }
        }
        if let Some(passing) = date_of_passing {
            if passing > today {
                return Err(ValidationError::invalid_format(
                    "date_of_passing",
                    "cannot be in the future",
                ));
            }
        }
        if let (Some(birth), Some(passing)) = (date_of_birth, date_of_passing) {
            if birth > passing {
                return Err(ValidationError::invalid_format(
                    "date_of_birth",
                    "must not be after date_of_passing",
                ));
            }
        }
        Ok(Self {
            date_of_birth,
            date_of_passing,
        })
    }

    /// Rebuilds dates read from the store without re-checking them.
    pub fn from_stored(
        date_of_birth: Option<NaiveDate>,
        date_of_passing: Option<NaiveDate>,
    ) -> Self {
        Self {
            date_of_birth,
            date_of_passing,
        }
    }

    pub fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    pub fn date_of_passing(&self) -> Option<NaiveDate> {
        self.date_of_passing
    }
}
