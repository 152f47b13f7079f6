//! PostgreSQL implementation of SubscriptionRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::subscription::{Activation, Subscription, SubscriptionStatus};
use crate::ports::SubscriptionRepository;

use super::{corrupt, db_error, parse_user_id};

/// PostgreSQL implementation of the SubscriptionRepository port.
///
/// `user_id` is the primary key, so concurrent deliveries for one user
/// resolve to a single row through `ON CONFLICT`.
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    user_id: String,
    plan: String,
    status: String,
    expiry_date: Option<DateTime<Utc>>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        Ok(Subscription {
            user_id: parse_user_id("user_id", row.user_id)?,
            plan: row.plan.parse().map_err(|_| corrupt("plan", &row.plan))?,
            status: row
                .status
                .parse::<SubscriptionStatus>()
                .map_err(|e| corrupt("status", e))?,
            expiry_date: row.expiry_date.map(Timestamp::from_datetime),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn upsert_activation(
        &self,
        activation: &Activation,
    ) -> Result<Subscription, DomainError> {
        let row: SubscriptionRow = sqlx::query_as(
            r#"
            INSERT INTO subscriptions (user_id, plan, status, expiry_date, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE SET
                plan = EXCLUDED.plan,
                status = EXCLUDED.status,
                expiry_date = COALESCE(EXCLUDED.expiry_date, subscriptions.expiry_date),
                updated_at = EXCLUDED.updated_at
            RETURNING user_id, plan, status, expiry_date, updated_at
            "#,
        )
        .bind(activation.user_id.as_str())
        .bind(activation.plan.as_str())
        .bind(activation.status().as_str())
        .bind(activation.expiry_date.map(|t| *t.as_datetime()))
        .bind(activation.paid_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("upsert subscription", e))?;

        Subscription::try_from(row)
    }

    async fn find_by_user_id(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT user_id, plan, status, expiry_date, updated_at
            FROM subscriptions
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("find subscription", e))?;

        row.map(Subscription::try_from).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::postgres::{fresh_user, test_pool};
    use crate::domain::subscription::Plan;

    fn row(plan: &str, status: &str) -> SubscriptionRow {
        SubscriptionRow {
            user_id: "user-1".to_string(),
            plan: plan.to_string(),
            status: status.to_string(),
            expiry_date: None,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_subscription() {
        let sub = Subscription::try_from(row("evermore", "trialing")).unwrap();
        assert_eq!(sub.plan, Plan::Evermore);
        assert_eq!(sub.status, SubscriptionStatus::Trialing);
    }

    #[test]
    fn unknown_plan_in_row_is_an_error() {
        assert!(Subscription::try_from(row("platinum", "active")).is_err());
    }

    #[test]
    fn unknown_status_in_row_is_an_error() {
        assert!(Subscription::try_from(row("legacy", "paused")).is_err());
    }

    // ══════════════════════════════════════════════════════════════
    // Database tests: DATABASE_URL=postgres://... cargo test -- --ignored
    // ══════════════════════════════════════════════════════════════

    #[tokio::test]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn repeated_activation_yields_one_identical_row() {
        let repo = PostgresSubscriptionRepository::new(test_pool().await);
        let user = fresh_user();
        let paid_at = Timestamp::from_unix_secs(1_736_935_200).unwrap();
        let activation = Activation::for_purchase(user.clone(), Plan::Evermore, paid_at);

        let first = repo.upsert_activation(&activation).await.unwrap();
        let second = repo.upsert_activation(&activation).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(repo.find_by_user_id(&user).await.unwrap(), Some(second));
    }

    #[tokio::test]
    #[ignore = "Requires PostgreSQL (DATABASE_URL)"]
    async fn free_activation_keeps_existing_expiry() {
        let repo = PostgresSubscriptionRepository::new(test_pool().await);
        let user = fresh_user();
        let paid_at = Timestamp::from_unix_secs(1_736_935_200).unwrap();
        let legacy = repo
            .upsert_activation(&Activation::for_purchase(user.clone(), Plan::Legacy, paid_at))
            .await
            .unwrap();

        let free = repo
            .upsert_activation(&Activation::for_purchase(user, Plan::Free, Timestamp::now()))
            .await
            .unwrap();

        assert_eq!(free.plan, Plan::Free);
        assert_eq!(free.status, SubscriptionStatus::Active);
        assert!(legacy.expiry_date.is_some());
        assert_eq!(free.expiry_date, legacy.expiry_date);
    }
}
