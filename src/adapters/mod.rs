//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - axum REST API
//! - `postgres` - sqlx-backed repositories
//! - `memory` - in-process repositories for tests and local runs
//! - `paymongo` - hosted checkout and webhook verification
//! - `auth` - bearer token validation

pub mod auth;
pub mod http;
pub mod memory;
pub mod paymongo;
pub mod postgres;
