//! Request and response DTOs for profile endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::adapters::http::media::MediaUrls;
use crate::domain::profile::Profile;

/// Request to save the caller's profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProfileRequest {
    pub full_name: Option<String>,
    pub avatar_ref: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: String,
    pub full_name: Option<String>,
    pub avatar_ref: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileResponse {
    pub fn new(profile: &Profile, media: &MediaUrls) -> Self {
        Self {
            id: profile.id.to_string(),
            full_name: profile.full_name.clone(),
            avatar_ref: profile.avatar.as_ref().map(|a| a.as_str().to_string()),
            avatar_url: profile.avatar.as_ref().and_then(|a| media.delivery_url(a)),
            updated_at: *profile.updated_at.as_datetime(),
        }
    }
}
