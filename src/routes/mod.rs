use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::Serialize;

use crate::domain::RuleViolation;
use crate::handlers::SubscriptionError;

pub mod authenticated_user;
mod health_check;
mod subscriptions;

pub use authenticated_user::AuthenticatedUser;
pub use health_check::health_check;
pub use subscriptions::{list_subscriptions, subscribe, unsubscribe};

#[derive(Serialize)]
pub(crate) struct ErrorBody<'a> {
    pub error: &'a str,
}

/// A `{meetup_id}` that is not an integer cannot name a meetup.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        tracing::info!(error = %err, "Malformed meetup id in path");
        let response = HttpResponse::NotFound().json(ErrorBody {
            error: &SubscriptionError::MeetupNotFound.to_string(),
        });
        InternalError::from_response(err, response).into()
    })
}

impl ResponseError for SubscriptionError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscriptionError::MeetupNotFound | SubscriptionError::UserNotFound => {
                StatusCode::NOT_FOUND
            }
            SubscriptionError::Rejected(
                RuleViolation::OrganizerCannotSubscribe | RuleViolation::OrganizerCannotUnsubscribe,
            ) => StatusCode::UNAUTHORIZED,
            SubscriptionError::Rejected(
                RuleViolation::MeetupAlreadyHappened | RuleViolation::ScheduleConflict,
            ) => StatusCode::BAD_REQUEST,
            SubscriptionError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            SubscriptionError::Unexpected(err) => {
                tracing::error!(error = ?err, "Subscription request failed");
                "Erro interno do servidor".to_owned()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody { error: &message })
    }
}
