//! In-memory store adapters.
//!
//! Back the handler unit tests and the router integration tests, and let
//! the service run without a database in local development. Rows live in
//! `RwLock`-guarded collections; listing order matches the Postgres
//! adapters (newest first).

mod gallery;
mod guestbook;
mod memorial;
mod profile;
mod subscription;

pub use gallery::InMemoryGalleryRepository;
pub use guestbook::InMemoryGuestbookRepository;
pub use memorial::InMemoryMemorialRepository;
pub use profile::InMemoryProfileRepository;
pub use subscription::InMemorySubscriptionRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

fn poisoned() -> DomainError {
    DomainError::new(ErrorCode::InternalError, "in-memory store lock poisoned")
}

fn simulated_failure() -> DomainError {
    DomainError::database("Simulated store failure")
}

/// Sorts newest first, keeping later inserts ahead on equal timestamps.
fn newest_first<T, K: Ord>(mut rows: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    rows.reverse();
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}
