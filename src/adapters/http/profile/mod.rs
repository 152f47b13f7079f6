//! HTTP adapter for the caller's profile.

mod dto;
mod handlers;
mod routes;

pub use dto::{ProfileResponse, SaveProfileRequest};
pub use routes::profile_routes;
