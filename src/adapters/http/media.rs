//! Delivery URLs for stored media references.

use crate::domain::memorial::MediaRef;

const DELIVERY_HOST: &str = "https://res.cloudinary.com";

/// Turns a stored media reference into a URL clients can load.
///
/// References that are already URLs pass through. Public ids are
/// resolved against the configured cloud; without one they stay
/// unresolved and clients get only the reference.
#[derive(Debug, Clone, Default)]
pub struct MediaUrls {
    cloud_name: Option<String>,
}

impl MediaUrls {
    pub fn new(cloud_name: Option<String>) -> Self {
        Self {
            cloud_name: cloud_name.filter(|c| !c.trim().is_empty()),
        }
    }

    pub fn delivery_url(&self, media: &MediaRef) -> Option<String> {
        if media.is_url() {
            return Some(media.as_str().to_string());
        }
        self.cloud_name
            .as_ref()
            .map(|cloud| format!("{}/{}/image/upload/{}", DELIVERY_HOST, cloud, media.as_str()))
    }
}
