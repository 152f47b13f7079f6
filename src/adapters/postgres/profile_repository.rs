//! PostgreSQL implementation of ProfileRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::profile::Profile;
use crate::ports::ProfileRepository;

use super::{db_error, parse_media_ref, parse_user_id};

/// PostgreSQL implementation of the ProfileRepository port.
///
/// The profile id is the identity provider's user id.
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: String,
    full_name: Option<String>,
    avatar_ref: Option<String>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: parse_user_id("id", row.id)?,
            full_name: row.full_name,
            avatar: parse_media_ref("avatar_ref", row.avatar_ref)?,
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn upsert(&self, profile: &Profile) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, full_name, avatar_ref, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                avatar_ref = EXCLUDED.avatar_ref,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.id.as_str())
        .bind(&profile.full_name)
        .bind(profile.avatar.as_ref().map(|a| a.as_str()))
        .bind(profile.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("save profile", e))?;

        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT id, full_name, avatar_ref, updated_at
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find profile", e))?;

        row.map(Profile::try_from).transpose()
    }
}
