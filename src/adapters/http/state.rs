//! Shared application state.

use std::sync::Arc;

use crate::application::handlers::memorial::{
    AddPhotoHandler, CreateMemorialHandler, DeleteGuestbookEntryHandler, DeletePhotoHandler,
    GetMemorialPageHandler, ListMemorialsHandler, SignGuestbookHandler, UpdateMemorialHandler,
};
use crate::application::handlers::profile::{GetProfileHandler, SaveProfileHandler};
use crate::application::handlers::subscription::{
    CreateCheckoutHandler, GetSubscriptionHandler, HandlePaymentWebhookHandler,
};
use crate::ports::{
    GalleryRepository, GuestbookRepository, MemorialRepository, PaymentProvider,
    ProfileRepository, SessionValidator, SubscriptionRepository,
};

use super::media::MediaUrls;

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every field is Arc-wrapped or cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub memorials: Arc<dyn MemorialRepository>,
    pub gallery: Arc<dyn GalleryRepository>,
    pub guestbook: Arc<dyn GuestbookRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub session_validator: Arc<dyn SessionValidator>,
    /// Public site URL used for checkout redirects.
    pub base_url: String,
    pub media: MediaUrls,
}

impl AppState {
    pub fn create_checkout_handler(&self) -> CreateCheckoutHandler {
        CreateCheckoutHandler::new(self.payment_provider.clone(), self.base_url.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(self.subscriptions.clone(), self.payment_provider.clone())
    }

    pub fn get_subscription_handler(&self) -> GetSubscriptionHandler {
        GetSubscriptionHandler::new(self.subscriptions.clone())
    }

    pub fn create_memorial_handler(&self) -> CreateMemorialHandler {
        CreateMemorialHandler::new(self.memorials.clone(), self.subscriptions.clone())
    }

    pub fn update_memorial_handler(&self) -> UpdateMemorialHandler {
        UpdateMemorialHandler::new(self.memorials.clone(), self.subscriptions.clone())
    }

    pub fn list_memorials_handler(&self) -> ListMemorialsHandler {
        ListMemorialsHandler::new(self.memorials.clone())
    }

    pub fn memorial_page_handler(&self) -> GetMemorialPageHandler {
        GetMemorialPageHandler::new(
            self.memorials.clone(),
            self.gallery.clone(),
            self.guestbook.clone(),
        )
    }

    pub fn add_photo_handler(&self) -> AddPhotoHandler {
        AddPhotoHandler::new(self.memorials.clone(), self.gallery.clone())
    }

    pub fn delete_photo_handler(&self) -> DeletePhotoHandler {
        DeletePhotoHandler::new(self.memorials.clone(), self.gallery.clone())
    }

    pub fn sign_guestbook_handler(&self) -> SignGuestbookHandler {
        SignGuestbookHandler::new(self.memorials.clone(), self.guestbook.clone())
    }

    pub fn delete_guestbook_entry_handler(&self) -> DeleteGuestbookEntryHandler {
        DeleteGuestbookEntryHandler::new(self.memorials.clone(), self.guestbook.clone())
    }

    pub fn get_profile_handler(&self) -> GetProfileHandler {
        GetProfileHandler::new(self.profiles.clone())
    }

    pub fn save_profile_handler(&self) -> SaveProfileHandler {
        SaveProfileHandler::new(self.profiles.clone())
    }
}
