//! PostgreSQL implementation of GuestbookRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, GuestbookEntryId, MemorialId, Timestamp};
use crate::domain::memorial::GuestbookEntry;
use crate::ports::GuestbookRepository;

use super::{db_error, parse_user_id};

pub struct PostgresGuestbookRepository {
    pool: PgPool,
}

impl PostgresGuestbookRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct GuestbookEntryRow {
    id: Uuid,
    memorial_id: Uuid,
    author_id: String,
    author_name: String,
    message: String,
    role: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<GuestbookEntryRow> for GuestbookEntry {
    type Error = DomainError;

    fn try_from(row: GuestbookEntryRow) -> Result<Self, Self::Error> {
        Ok(GuestbookEntry {
            id: GuestbookEntryId::from_uuid(row.id),
            memorial_id: MemorialId::from_uuid(row.memorial_id),
            author_id: parse_user_id("author_id", row.author_id)?,
            author_name: row.author_name,
            message: row.message,
            role: row.role,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl GuestbookRepository for PostgresGuestbookRepository {
    async fn insert(&self, entry: &GuestbookEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO guestbook_entries (
                id, memorial_id, author_id, author_name, message, role, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.memorial_id.as_uuid())
        .bind(entry.author_id.as_str())
        .bind(&entry.author_name)
        .bind(&entry.message)
        .bind(&entry.role)
        .bind(entry.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("insert guestbook entry", e))?;

        Ok(())
    }

    async fn list_by_memorial(
        &self,
        memorial_id: &MemorialId,
    ) -> Result<Vec<GuestbookEntry>, DomainError> {
        let rows: Vec<GuestbookEntryRow> = sqlx::query_as(
            r#"
            SELECT id, memorial_id, author_id, author_name, message, role, created_at
            FROM guestbook_entries
            WHERE memorial_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(memorial_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list guestbook entries", e))?;

        rows.into_iter().map(GuestbookEntry::try_from).collect()
    }

    async fn delete(
        &self,
        memorial_id: &MemorialId,
        entry_id: &GuestbookEntryId,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM guestbook_entries WHERE id = $1 AND memorial_id = $2")
            .bind(entry_id.as_uuid())
            .bind(memorial_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("delete guestbook entry", e))?;

        Ok(result.rows_affected() > 0)
    }
}
