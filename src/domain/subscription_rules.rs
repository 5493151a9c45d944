//! Business rules guarding subscriptions. Everything here is pure: the
//! caller loads the state and passes in the evaluation instant.

use chrono::{DateTime, Duration, DurationRound, Utc};

use crate::domain::meetup::Meetup;

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleViolation {
    #[error("O organizador do meetup não pode se inscrever no próprio meetup")]
    OrganizerCannotSubscribe,
    #[error("O organizador do meetup não pode se inscrever no meetup")]
    OrganizerCannotUnsubscribe,
    #[error("meetup já realizado não é permitido se inscrever")]
    MeetupAlreadyHappened,
    #[error("Já está inscrito em outro meetup com o mesmo horário.")]
    ScheduleConflict,
}

/// A meetup exactly at `now` is no longer available.
pub fn is_available(date: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    date > now
}

pub fn start_of_hour(date: DateTime<Utc>) -> DateTime<Utc> {
    date.duration_trunc(Duration::hours(1)).unwrap_or(date)
}

/// Same UTC calendar day and same clock hour.
pub fn shares_time_slot(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    start_of_hour(a) == start_of_hour(b)
}

pub fn check_can_subscribe(
    user_id: i32,
    meetup: &Meetup,
    now: DateTime<Utc>,
) -> Result<(), RuleViolation> {
    if meetup.provider_id == user_id {
        return Err(RuleViolation::OrganizerCannotSubscribe);
    }
    // Once the meetup's hour has started it counts as already happened.
    if start_of_hour(meetup.date) <= now {
        return Err(RuleViolation::MeetupAlreadyHappened);
    }
    Ok(())
}

pub fn check_schedule(meetup: &Meetup, user_meetups: &[Meetup]) -> Result<(), RuleViolation> {
    let conflict = user_meetups
        .iter()
        .any(|current| shares_time_slot(current.date, meetup.date));
    if conflict {
        Err(RuleViolation::ScheduleConflict)
    } else {
        Ok(())
    }
}

pub fn check_can_unsubscribe(user_id: i32, meetup: &Meetup) -> Result<(), RuleViolation> {
    if meetup.provider_id == user_id {
        Err(RuleViolation::OrganizerCannotUnsubscribe)
    } else {
        Ok(())
    }
}
