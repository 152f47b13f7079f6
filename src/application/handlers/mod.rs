//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod memorial;
pub mod profile;
pub mod subscription;
