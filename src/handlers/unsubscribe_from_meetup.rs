use crate::db::repository::MeetupRepository;
use crate::domain::subscription_rules::check_can_unsubscribe;
use crate::domain::Meetup;
use crate::handlers::SubscriptionError;

#[tracing::instrument(name = "Unsubscribe a user from a meetup", skip(repository))]
pub async fn unsubscribe_from_meetup(
    repository: &dyn MeetupRepository,
    user_id: i32,
    meetup_id: i32,
) -> Result<Meetup, SubscriptionError> {
    let found = repository
        .find_meetup_by_id(meetup_id)
        .await?
        .ok_or(SubscriptionError::MeetupNotFound)?;
    check_can_unsubscribe(user_id, &found.meetup)?;
    repository.remove_subscription(user_id, meetup_id).await?;
    Ok(found.meetup)
}
