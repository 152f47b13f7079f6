//! Memorial handlers.
//!
//! Command and query handlers for memorial pages and their gallery and
//! guestbook:
//!
//! ## Commands
//! - Creating and updating memorials (publishing is gated on the plan)
//! - Adding and deleting gallery photos
//! - Signing the guestbook and moderating entries
//!
//! ## Queries
//! - The public memorial page
//! - The owner's dashboard list

mod add_photo;
mod create_memorial;
mod delete_guestbook_entry;
mod delete_photo;
mod get_memorial_page;
mod list_memorials;
mod sign_guestbook;
mod update_memorial;

use crate::domain::foundation::{MemorialId, OwnedByUser, Timestamp, UserId};
use crate::domain::memorial::{ensure_visibility_allowed, Memorial, MemorialError};
use crate::ports::{MemorialRepository, SubscriptionRepository};

// Commands
pub use add_photo::{AddPhotoCommand, AddPhotoHandler};
pub use create_memorial::{CreateMemorialCommand, CreateMemorialHandler};
pub use delete_guestbook_entry::{DeleteGuestbookEntryCommand, DeleteGuestbookEntryHandler};
pub use delete_photo::{DeletePhotoCommand, DeletePhotoHandler};
pub use sign_guestbook::{SignGuestbookCommand, SignGuestbookHandler};
pub use update_memorial::{UpdateMemorialCommand, UpdateMemorialHandler};

// Queries
pub use get_memorial_page::{GetMemorialPageHandler, GetMemorialPageQuery, MemorialPage};
pub use list_memorials::{ListMemorialsHandler, ListMemorialsQuery};

/// Loads a memorial the caller owns.
///
/// Missing and foreign memorials are indistinguishable to the caller.
async fn load_owned(
    memorials: &dyn MemorialRepository,
    id: &MemorialId,
    caller: &UserId,
) -> Result<Memorial, MemorialError> {
    match memorials.find_by_id(id).await? {
        Some(memorial) if memorial.is_owner(caller) => Ok(memorial),
        _ => Err(MemorialError::not_found(*id)),
    }
}

/// Applies the visibility gate to a memorial about to be written.
async fn check_gate(
    subscriptions: &dyn SubscriptionRepository,
    memorial: &Memorial,
) -> Result<(), MemorialError> {
    if !memorial.visibility.is_public() {
        return Ok(());
    }
    let subscription = subscriptions.find_by_user_id(&memorial.owner_id).await?;
    ensure_visibility_allowed(memorial.visibility, subscription.as_ref(), &Timestamp::now())
        .map_err(|e| {
            tracing::info!(
                memorial_id = %memorial.id,
                user_id = %memorial.owner_id,
                "Publish refused: no paid plan"
            );
            e
        })
}
