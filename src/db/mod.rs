use std::time::Duration;

use anyhow::Context;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::Config;

pub mod meetup_queries;
pub mod repository;
pub mod subscription_queries;
pub mod types;

pub async fn create_pool(config: &Config) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(3))
        .connect(config.database_url.expose_secret())
        .await
        .context("Failed to connect to Postgres")
}

pub async fn migrate(pg_pool: &PgPool) -> anyhow::Result<()> {
    tracing::info!("Running database migrations");
    sqlx::migrate!("./migrations")
        .run(pg_pool)
        .await
        .context("Failed to migrate the database")?;
    tracing::info!("Database migrations completed");
    Ok(())
}
