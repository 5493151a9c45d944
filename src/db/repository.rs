use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::meetup_queries::MeetupQueries;
use crate::db::subscription_queries::SubscriptionQueries;
use crate::domain::{Meetup, MeetupWithProvider, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddSubscriptionOutcome {
    Created,
    /// Another subscription of the user already occupies the meetup's hour.
    SlotTaken,
    UserNotFound,
}

/// Storage seen by the subscription workflow.
#[async_trait]
pub trait MeetupRepository: Send + Sync {
    async fn find_meetup_by_id(&self, meetup_id: i32) -> anyhow::Result<Option<MeetupWithProvider>>;

    async fn find_user(&self, user_id: i32) -> anyhow::Result<Option<User>>;

    /// Meetups the user is subscribed to, latest first. Empty for unknown users.
    async fn find_user_meetups(&self, user_id: i32) -> anyhow::Result<Vec<Meetup>>;

    /// Links the user to the meetup unless that would put two of the user's
    /// subscriptions in the same hour. Implementations must make the check and
    /// the insert atomic with respect to other writes for the same user.
    async fn add_subscription(
        &self,
        user_id: i32,
        meetup: &Meetup,
    ) -> anyhow::Result<AddSubscriptionOutcome>;

    /// Idempotent.
    async fn remove_subscription(&self, user_id: i32, meetup_id: i32) -> anyhow::Result<()>;
}

#[derive(Clone)]
pub struct PgMeetupRepository {
    pg_pool: PgPool,
}

impl PgMeetupRepository {
    pub fn new(pg_pool: PgPool) -> Self {
        Self { pg_pool }
    }
}

#[async_trait]
impl MeetupRepository for PgMeetupRepository {
    async fn find_meetup_by_id(&self, meetup_id: i32) -> anyhow::Result<Option<MeetupWithProvider>> {
        MeetupQueries::fetch_meetup_with_provider(&self.pg_pool, meetup_id).await
    }

    async fn find_user(&self, user_id: i32) -> anyhow::Result<Option<User>> {
        MeetupQueries::fetch_user(&self.pg_pool, user_id).await
    }

    async fn find_user_meetups(&self, user_id: i32) -> anyhow::Result<Vec<Meetup>> {
        MeetupQueries::fetch_user_meetups(&self.pg_pool, user_id).await
    }

    #[tracing::instrument(name = "Add subscription", skip(self, meetup), fields(meetup_id = meetup.id))]
    async fn add_subscription(
        &self,
        user_id: i32,
        meetup: &Meetup,
    ) -> anyhow::Result<AddSubscriptionOutcome> {
        let mut tx = self
            .pg_pool
            .begin()
            .await
            .context("Failed to acquire a transaction")?;
        if !SubscriptionQueries::lock_user(&mut tx, user_id).await? {
            return Ok(AddSubscriptionOutcome::UserNotFound);
        }
        if SubscriptionQueries::has_subscription_in_slot(&mut tx, user_id, meetup.id).await? {
            return Ok(AddSubscriptionOutcome::SlotTaken);
        }
        SubscriptionQueries::insert_subscription(&mut tx, user_id, meetup.id).await?;
        tx.commit()
            .await
            .context("Failed to commit the transaction")?;
        Ok(AddSubscriptionOutcome::Created)
    }

    async fn remove_subscription(&self, user_id: i32, meetup_id: i32) -> anyhow::Result<()> {
        let removed =
            SubscriptionQueries::delete_subscription(&self.pg_pool, user_id, meetup_id).await?;
        if removed == 0 {
            tracing::info!(user_id, meetup_id, "No subscription to remove");
        }
        Ok(())
    }
}
