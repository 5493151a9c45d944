use chrono::{DateTime, Utc};

use crate::db::repository::MeetupRepository;
use crate::domain::SubscribedMeetup;

#[tracing::instrument(name = "List subscriptions of a user", skip(repository))]
pub async fn list_subscriptions(
    repository: &dyn MeetupRepository,
    user_id: i32,
    now: DateTime<Utc>,
) -> anyhow::Result<Vec<SubscribedMeetup>> {
    let meetups = repository.find_user_meetups(user_id).await?;
    Ok(meetups
        .into_iter()
        .map(|meetup| SubscribedMeetup::from_meetup(meetup, now))
        .collect())
}
