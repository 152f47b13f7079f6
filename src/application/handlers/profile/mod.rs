//! Profile handlers.
//!
//! - Get the caller's profile
//! - Save (upsert) the caller's profile

mod get_profile;
mod save_profile;

pub use get_profile::{GetProfileHandler, GetProfileQuery};
pub use save_profile::{SaveProfileCommand, SaveProfileHandler};
