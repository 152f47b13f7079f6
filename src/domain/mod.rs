//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, identity)
//! - `subscription` - Plans, checkout prices, PayMongo webhook verification
//! - `memorial` - Memorial pages, gallery, guestbook, visibility gate
//! - `profile` - Per-user display details

pub mod foundation;
pub mod memorial;
pub mod profile;
pub mod subscription;
