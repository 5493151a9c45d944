use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::db::repository::PgMeetupRepository;
use crate::events::EventSender;
use crate::handlers::list_subscriptions::list_subscriptions as list_user_subscriptions;
use crate::handlers::subscribe_to_meetup::subscribe_to_meetup;
use crate::handlers::unsubscribe_from_meetup::unsubscribe_from_meetup;
use crate::handlers::SubscriptionError;
use crate::routes::AuthenticatedUser;

#[tracing::instrument(
    name = "Listing subscriptions",
    skip(user, repository),
    fields(user_id = user.0)
)]
pub async fn list_subscriptions(
    user: AuthenticatedUser,
    repository: web::Data<PgMeetupRepository>,
) -> Result<HttpResponse, SubscriptionError> {
    let meetups = list_user_subscriptions(repository.get_ref(), user.0, Utc::now()).await?;
    Ok(HttpResponse::Ok().json(meetups))
}

#[tracing::instrument(
    name = "Subscribing to a meetup",
    skip(user, meetup_id, repository, events),
    fields(user_id = user.0, meetup_id = *meetup_id)
)]
pub async fn subscribe(
    user: AuthenticatedUser,
    meetup_id: web::Path<i32>,
    repository: web::Data<PgMeetupRepository>,
    events: web::Data<EventSender>,
) -> Result<HttpResponse, SubscriptionError> {
    let meetup = subscribe_to_meetup(
        repository.get_ref(),
        events.get_ref(),
        user.0,
        meetup_id.into_inner(),
        Utc::now(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(meetup))
}

#[tracing::instrument(
    name = "Unsubscribing from a meetup",
    skip(user, meetup_id, repository),
    fields(user_id = user.0, meetup_id = *meetup_id)
)]
pub async fn unsubscribe(
    user: AuthenticatedUser,
    meetup_id: web::Path<i32>,
    repository: web::Data<PgMeetupRepository>,
) -> Result<HttpResponse, SubscriptionError> {
    let meetup =
        unsubscribe_from_meetup(repository.get_ref(), user.0, meetup_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(meetup))
}
