use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::domain::subscription_rules::is_available;
use crate::domain::user_email::{Mailbox, UserEmail};

#[derive(FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Meetup {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub localization: String,
    pub date: DateTime<Utc>,
    pub banner: Option<i32>,
    pub provider_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The organizer's public identity, as embedded in a subscribe response.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    pub name: String,
    pub email: String,
}

impl Provider {
    pub fn mailbox(&self) -> Result<Mailbox, String> {
        Ok(Mailbox {
            name: self.name.clone(),
            email: UserEmail::parse(self.email.clone())?,
        })
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MeetupWithProvider {
    #[serde(flatten)]
    pub meetup: Meetup,
    pub provider: Provider,
}

/// One entry of a user's subscription listing.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SubscribedMeetup {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub localization: String,
    pub date: DateTime<Utc>,
    pub available: bool,
}

impl SubscribedMeetup {
    pub fn from_meetup(meetup: Meetup, now: DateTime<Utc>) -> Self {
        Self {
            available: is_available(meetup.date, now),
            id: meetup.id,
            title: meetup.title,
            description: meetup.description,
            localization: meetup.localization,
            date: meetup.date,
        }
    }
}
