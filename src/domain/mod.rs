pub mod meetup;
pub mod subscription_rules;
pub mod user;
pub mod user_email;

pub use meetup::{Meetup, MeetupWithProvider, Provider, SubscribedMeetup};
pub use subscription_rules::RuleViolation;
pub use user::User;
pub use user_email::{Mailbox, UserEmail};
