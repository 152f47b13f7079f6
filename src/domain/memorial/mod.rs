//! Memorial domain module.
//!
//! Memorial pages, their photo gallery and guestbook, and the visibility
//! gate that ties publishing to a paid plan.

mod aggregate;
mod errors;
mod gallery;
mod guestbook;
mod values;
mod visibility_gate;

pub use aggregate::{normalize_bio, Memorial, MemorialChanges, NewMemorial, MAX_BIO_LENGTH};
pub use errors::{MemorialError, PAID_PLAN_REQUIRED_MESSAGE};
pub use gallery::{GalleryPhoto, DEFAULT_CAPTION};
pub use guestbook::GuestbookEntry;
pub use values::{LifeDates, MediaRef, MemorialName, ServiceType, Visibility};
pub use visibility_gate::{can_publish, ensure_visibility_allowed};

#[cfg(test)]
pub(crate) use aggregate::test_memorial;
