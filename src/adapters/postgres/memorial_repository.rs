//! PostgreSQL implementation of MemorialRepository.
//!
//! Both write statements carry the visibility gate: a row can only be
//! stored as `public` when the owner's subscription row passes it at the
//! database clock.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, MemorialId, Timestamp, UserId};
use crate::domain::memorial::{LifeDates, Memorial, MemorialName, PAID_PLAN_REQUIRED_MESSAGE};
use crate::ports::MemorialRepository;

use super::{corrupt, db_error, parse_media_ref, parse_user_id};

/// SQL predicate true when memorial owner `$2` may store visibility `$6`.
const PUBLISH_ALLOWED: &str = r#"
    ($6 = 'private' OR EXISTS (
        SELECT 1 FROM subscriptions s
        WHERE s.user_id = $2
          AND s.status IN ('active', 'trialing')
          AND s.plan <> 'free'
          AND (s.expiry_date IS NULL OR s.expiry_date > now())
    ))
"#;

const SELECT_COLUMNS: &str = r#"
    SELECT id, owner_id, name, bio, service_type, visibility,
           date_of_birth, date_of_passing, image_ref, created_at, updated_at
    FROM memorials
"#;

/// PostgreSQL implementation of the MemorialRepository port.
pub struct PostgresMemorialRepository {
    pool: PgPool,
}

impl PostgresMemorialRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists_for_owner(
        &self,
        id: &MemorialId,
        owner: &UserId,
    ) -> Result<bool, DomainError> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM memorials WHERE id = $1 AND owner_id = $2)",
        )
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("check memorial", e))
    }
}

/// Database row representation of a memorial.
#[derive(Debug, sqlx::FromRow)]
struct MemorialRow {
    id: Uuid,
    owner_id: String,
    name: String,
    bio: Option<String>,
    service_type: String,
    visibility: String,
    date_of_birth: Option<NaiveDate>,
    date_of_passing: Option<NaiveDate>,
    image_ref: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MemorialRow> for Memorial {
    type Error = DomainError;

    fn try_from(row: MemorialRow) -> Result<Self, Self::Error> {
        Ok(Memorial {
            id: MemorialId::from_uuid(row.id),
            owner_id: parse_user_id("owner_id", row.owner_id)?,
            name: MemorialName::new(row.name).map_err(|e| corrupt("name", e))?,
            bio: row.bio,
            service_type: row
                .service_type
                .parse()
                .map_err(|e| corrupt("service_type", e))?,
            visibility: row.visibility.parse().map_err(|e| corrupt("visibility", e))?,
            dates: LifeDates::from_stored(row.date_of_birth, row.date_of_passing),
            image: parse_media_ref("image_ref", row.image_ref)?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn paid_plan_required(memorial: &Memorial) -> DomainError {
    DomainError::new(ErrorCode::PaidPlanRequired, PAID_PLAN_REQUIRED_MESSAGE)
        .with_detail("memorial_id", memorial.id.to_string())
}

#[async_trait]
impl MemorialRepository for PostgresMemorialRepository {
    async fn insert(&self, memorial: &Memorial) -> Result<(), DomainError> {
        let sql = format!(
            r#"
            INSERT INTO memorials (
                id, owner_id, name, bio, service_type, visibility,
                date_of_birth, date_of_passing, image_ref, created_at, updated_at
            )
            SELECT $1::uuid, $2::text, $3::text, $4::text, $5::text, $6::text,
                   $7::date, $8::date, $9::text, $10::timestamptz, $11::timestamptz
            WHERE {}
            "#,
            PUBLISH_ALLOWED
        );

        let result = sqlx::query(&sql)
            .bind(memorial.id.as_uuid())
            .bind(memorial.owner_id.as_str())
            .bind(memorial.name.as_str())
            .bind(&memorial.bio)
            .bind(memorial.service_type.as_str())
            .bind(memorial.visibility.as_str())
            .bind(memorial.dates.date_of_birth())
            .bind(memorial.dates.date_of_passing())
            .bind(memorial.image.as_ref().map(|m| m.as_str()))
            .bind(memorial.created_at.as_datetime())
            .bind(memorial.updated_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("insert memorial", e))?;

        if result.rows_affected() == 0 {
            return Err(paid_plan_required(memorial));
        }
        Ok(())
    }

    async fn update(&self, memorial: &Memorial) -> Result<bool, DomainError> {
        let sql = format!(
            r#"
            UPDATE memorials SET
                name = $3,
                bio = $4,
                service_type = $5,
                visibility = $6,
                date_of_birth = $7,
                date_of_passing = $8,
                image_ref = $9,
                updated_at = $10
            WHERE id = $1 AND owner_id = $2 AND {}
            "#,
            PUBLISH_ALLOWED
        );

        let result = sqlx::query(&sql)
            .bind(memorial.id.as_uuid())
            .bind(memorial.owner_id.as_str())
            .bind(memorial.name.as_str())
            .bind(&memorial.bio)
            .bind(memorial.service_type.as_str())
            .bind(memorial.visibility.as_str())
            .bind(memorial.dates.date_of_birth())
            .bind(memorial.dates.date_of_passing())
            .bind(memorial.image.as_ref().map(|m| m.as_str()))
            .bind(memorial.updated_at.as_datetime())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("update memorial", e))?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // Nothing matched: either no such owned row, or the gate refused.
        if self.exists_for_owner(&memorial.id, &memorial.owner_id).await? {
            return Err(paid_plan_required(memorial));
        }
        Ok(false)
    }

    async fn find_by_id(&self, id: &MemorialId) -> Result<Option<Memorial>, DomainError> {
        let sql = format!("{} WHERE id = $1", SELECT_COLUMNS);
        let row: Option<MemorialRow> = sqlx::query_as(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("find memorial", e))?;

        row.map(Memorial::try_from).transpose()
    }

    async fn list_by_owner(&self, owner_id: &UserId) -> Result<Vec<Memorial>, DomainError> {
        let sql = format!("{} WHERE owner_id = $1 ORDER BY created_at DESC", SELECT_COLUMNS);
        let rows: Vec<MemorialRow> = sqlx::query_as(&sql)
            .bind(owner_id.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list memorials", e))?;

        rows.into_iter().map(Memorial::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::postgres::{fresh_user, test_pool, PostgresSubscriptionRepository};
    use crate::domain::memorial::{test_memorial, ServiceType, Visibility};
    use crate::domain::subscription::{Activation, Plan};
    use crate::ports::SubscriptionRepository;

    fn row(service_type: &str, visibility: &str) -> MemorialRow {
        MemorialRow {
            id: Uuid::new_v4(),
            owner_id: "owner-1".to_string(),
            name: "Mingming".to_string(),
            bio: None,
            service_type: service_type.to_string(),
            visibility: visibility.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2010, 4, 2),
            date_of_passing: NaiveDate::from_ymd_opt(2024, 8, 9),
            image_ref: Some("memorials/mingming".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_memorial() {
        let memorial = Memorial::try_from(row("PAWS", "public")).unwrap();
        assert_eq!(memorial.service_type, ServiceType::Paws);
        assert_eq!(memorial.visibility, Visibility::Public);
        assert_eq!(memorial.image.unwrap().as_str(), "memorials/mingming");
    }

    #[test]
    fn unknown_visibility_is_an_error() {
        assert!(Memorial::try_from(row("PAWS", "unlisted")).is_err());
    }

    // ══════════════════════════════════════════════════════════════
    // Database tests: DATABASE_URL=postgres://... cargo test -- --ignored
    // ══════════════════════════════════════════════════════════════

    async fn stores() -> (PostgresMemorialRepository, PostgresSubscriptionRepository) {
        let pool = test_pool().await;
        (
            PostgresMemorialRepository::new(pool.clone()),
            PostgresSubscriptionRepository::new(pool),
        )
    }

    fn memorial_for(owner: &UserId, visibility: Visibility) -> Memorial {
        test_memorial(owner.as_str(), visibility)
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn public_insert_without_plan_is_refused() {
        let (memorials, _) = stores().await;
        let owner = fresh_user();
        let memorial = memorial_for(&owner, Visibility::Public);

        let err = memorials.insert(&memorial).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::PaidPlanRequired);
        assert!(memorials.find_by_id(&memorial.id).await.unwrap().is_none());
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn public_insert_with_active_plan_is_stored() {
        let (memorials, subscriptions) = stores().await;
        let owner = fresh_user();
        let activation = Activation::for_purchase(owner.clone(), Plan::Legacy, Timestamp::now());
        subscriptions.upsert_activation(&activation).await.unwrap();
        let memorial = memorial_for(&owner, Visibility::Public);

        memorials.insert(&memorial).await.unwrap();

        let stored = memorials.find_by_id(&memorial.id).await.unwrap().unwrap();
        assert_eq!(stored.visibility, Visibility::Public);
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn publishing_after_expiry_leaves_row_unchanged() {
        let (memorials, subscriptions) = stores().await;
        let owner = fresh_user();
        // 2025-01-15 + one month: long expired.
        let paid_at = Timestamp::from_unix_secs(1_736_935_200).unwrap();
        subscriptions
            .upsert_activation(&Activation::for_purchase(owner.clone(), Plan::Legacy, paid_at))
            .await
            .unwrap();
        let memorial = memorial_for(&owner, Visibility::Private);
        memorials.insert(&memorial).await.unwrap();

        let mut published = memorial.clone();
        published.visibility = Visibility::Public;
        published.bio = Some("Rewritten".to_string());
        let err = memorials.update(&published).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::PaidPlanRequired);
        let stored = memorials.find_by_id(&memorial.id).await.unwrap().unwrap();
        assert_eq!(stored.visibility, Visibility::Private);
        assert_eq!(stored.bio, memorial.bio);
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn update_by_other_owner_matches_nothing() {
        let (memorials, _) = stores().await;
        let memorial = memorial_for(&fresh_user(), Visibility::Private);
        memorials.insert(&memorial).await.unwrap();

        let mut hijacked = memorial.clone();
        hijacked.owner_id = fresh_user();

        assert!(!memorials.update(&hijacked).await.unwrap());
    }
}
