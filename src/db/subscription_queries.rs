use chrono::Utc;
use sqlx::PgPool;

use crate::db::types::Tx;

pub struct SubscriptionQueries;

impl SubscriptionQueries {
    /// Serializes concurrent subscription writes of the same user until the
    /// transaction ends. Returns `false` when the user does not exist.
    #[tracing::instrument(name = "Lock user row", skip(tx))]
    pub async fn lock_user(tx: &mut Tx<'_>, user_id: i32) -> anyhow::Result<bool> {
        let locked = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to execute query: {:?}", e);
                e
            })?;
        Ok(locked.is_some())
    }

    /// Whether the user already holds a subscription to a meetup in the same
    /// UTC day and hour as `meetup_id`.
    #[tracing::instrument(name = "Check subscription time slot", skip(tx))]
    pub async fn has_subscription_in_slot(
        tx: &mut Tx<'_>,
        user_id: i32,
        meetup_id: i32,
    ) -> anyhow::Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS (
                    SELECT 1
                    FROM "users-meetups" um
                    JOIN meetups m ON m.id = um.meetup_id
                    JOIN meetups target ON target.id = $2
                    WHERE um.user_id = $1
                      AND date_trunc('hour', m.date AT TIME ZONE 'UTC')
                        = date_trunc('hour', target.date AT TIME ZONE 'UTC')
                )
            "#,
        )
        .bind(user_id)
        .bind(meetup_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        Ok(taken)
    }

    #[tracing::instrument(name = "Insert subscription", skip(tx))]
    pub async fn insert_subscription(
        tx: &mut Tx<'_>,
        user_id: i32,
        meetup_id: i32,
    ) -> anyhow::Result<()> {
        let now = Utc::now();
        sqlx::query(
            r#"
                INSERT INTO "users-meetups" (user_id, meetup_id, created_at, updated_at)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(meetup_id)
        .bind(now)
        .bind(now)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        Ok(())
    }

    /// Deleting a subscription that does not exist is not an error.
    #[tracing::instrument(name = "Delete subscription", skip(pg_pool))]
    pub async fn delete_subscription(
        pg_pool: &PgPool,
        user_id: i32,
        meetup_id: i32,
    ) -> anyhow::Result<u64> {
        let result = sqlx::query(
            r#"
                DELETE FROM "users-meetups"
                WHERE user_id = $1 AND meetup_id = $2
            "#,
        )
        .bind(user_id)
        .bind(meetup_id)
        .execute(pg_pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        Ok(result.rows_affected())
    }
}
