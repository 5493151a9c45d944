use sqlx::{FromRow, PgPool};

use crate::domain::{Meetup, MeetupWithProvider, Provider, User};

#[derive(FromRow)]
struct MeetupWithProviderRow {
    #[sqlx(flatten)]
    meetup: Meetup,
    provider_name: String,
    provider_email: String,
}

impl From<MeetupWithProviderRow> for MeetupWithProvider {
    fn from(row: MeetupWithProviderRow) -> Self {
        Self {
            meetup: row.meetup,
            provider: Provider {
                name: row.provider_name,
                email: row.provider_email,
            },
        }
    }
}

pub struct MeetupQueries;

impl MeetupQueries {
    #[tracing::instrument(name = "Fetch meetup with its provider", skip(pg_pool))]
    pub async fn fetch_meetup_with_provider(
        pg_pool: &PgPool,
        meetup_id: i32,
    ) -> anyhow::Result<Option<MeetupWithProvider>> {
        let row = sqlx::query_as::<_, MeetupWithProviderRow>(
            r#"
                SELECT m.id, m.title, m.description, m.localization, m.date, m.banner,
                       m.provider_id, m.created_at, m.updated_at,
                       u.name AS provider_name, u.email AS provider_email
                FROM meetups m
                JOIN users u ON u.id = m.provider_id
                WHERE m.id = $1
            "#,
        )
        .bind(meetup_id)
        .fetch_optional(pg_pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        Ok(row.map(MeetupWithProvider::from))
    }

    #[tracing::instrument(name = "Fetch user", skip(pg_pool))]
    pub async fn fetch_user(pg_pool: &PgPool, user_id: i32) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT id, name, email FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(pg_pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to execute query: {:?}", e);
                e
            })?;
        Ok(user)
    }

    /// Meetups the user is subscribed to, latest first.
    #[tracing::instrument(name = "Fetch meetups subscribed by user", skip(pg_pool))]
    pub async fn fetch_user_meetups(pg_pool: &PgPool, user_id: i32) -> anyhow::Result<Vec<Meetup>> {
        let meetups = sqlx::query_as::<_, Meetup>(
            r#"
                SELECT m.id, m.title, m.description, m.localization, m.date, m.banner,
                       m.provider_id, m.created_at, m.updated_at
                FROM meetups m
                JOIN "users-meetups" um ON um.meetup_id = m.id
                WHERE um.user_id = $1
                ORDER BY m.date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pg_pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to execute query: {:?}", e);
            e
        })?;
        Ok(meetups)
    }
}
