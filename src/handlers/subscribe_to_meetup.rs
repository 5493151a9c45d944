use chrono::{DateTime, Utc};

use crate::db::repository::{AddSubscriptionOutcome, MeetupRepository};
use crate::domain::subscription_rules::{check_can_subscribe, check_schedule};
use crate::domain::{MeetupWithProvider, RuleViolation};
use crate::events::subscription_created::SubscriptionCreated;
use crate::events::EventSender;
use crate::handlers::SubscriptionError;

#[tracing::instrument(name = "Subscribe a user to a meetup", skip(repository, events))]
pub async fn subscribe_to_meetup(
    repository: &dyn MeetupRepository,
    events: &EventSender,
    user_id: i32,
    meetup_id: i32,
    now: DateTime<Utc>,
) -> Result<MeetupWithProvider, SubscriptionError> {
    let found = repository
        .find_meetup_by_id(meetup_id)
        .await?
        .ok_or(SubscriptionError::MeetupNotFound)?;
    check_can_subscribe(user_id, &found.meetup, now)?;

    let user = repository
        .find_user(user_id)
        .await?
        .ok_or(SubscriptionError::UserNotFound)?;
    let user_meetups = repository.find_user_meetups(user_id).await?;
    check_schedule(&found.meetup, &user_meetups)?;

    match repository.add_subscription(user_id, &found.meetup).await? {
        AddSubscriptionOutcome::Created => {}
        AddSubscriptionOutcome::SlotTaken => return Err(RuleViolation::ScheduleConflict.into()),
        AddSubscriptionOutcome::UserNotFound => return Err(SubscriptionError::UserNotFound),
    }

    match found.provider.mailbox() {
        Ok(provider) => {
            let event = SubscriptionCreated {
                provider,
                meetup_title: found.meetup.title.clone(),
                user_name: user.name,
            };
            if let Err(err) = SubscriptionCreated::publish(events, event) {
                tracing::error!(error = ?err, "Failed to publish SubscriptionCreated event");
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "Provider has no deliverable email, skipping notification")
        }
    }

    Ok(found)
}
