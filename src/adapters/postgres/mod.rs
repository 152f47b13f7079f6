//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresSubscriptionRepository` - Plan entitlements, upserted per user
//! - `PostgresMemorialRepository` - Memorial pages, with the visibility gate in SQL
//! - `PostgresGalleryRepository` - Memory Lane photos
//! - `PostgresGuestbookRepository` - Letters of Love
//! - `PostgresProfileRepository` - Per-user display details

mod gallery_repository;
mod guestbook_repository;
mod memorial_repository;
mod profile_repository;
mod subscription_repository;

pub use gallery_repository::PostgresGalleryRepository;
pub use guestbook_repository::PostgresGuestbookRepository;
pub use memorial_repository::PostgresMemorialRepository;
pub use profile_repository::PostgresProfileRepository;
pub use subscription_repository::PostgresSubscriptionRepository;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::domain::memorial::MediaRef;

/// Wraps a sqlx failure with what we were doing.
fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Failed to {}: {}", action, e))
}

/// A stored value that no longer satisfies its domain type.
fn corrupt(column: &str, detail: impl std::fmt::Display) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Invalid {} value: {}", column, detail),
    )
}

fn parse_user_id(column: &str, value: String) -> Result<UserId, DomainError> {
    UserId::new(value).map_err(|e| corrupt(column, e))
}

fn parse_media_ref(column: &str, value: Option<String>) -> Result<Option<MediaRef>, DomainError> {
    value
        .map(MediaRef::new)
        .transpose()
        .map_err(|e| corrupt(column, e))
}

/// Pool against `DATABASE_URL` with migrations applied.
///
/// Only the `#[ignore]`d database tests use it:
/// `DATABASE_URL=postgres://... cargo test -- --ignored`
#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = sqlx::PgPool::connect(&url)
        .await
        .expect("connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("apply migrations");
    pool
}

/// A user id no other test run has used.
#[cfg(test)]
pub(crate) fn fresh_user() -> UserId {
    UserId::new(format!("pg-test-{}", uuid::Uuid::new_v4())).unwrap()
}
