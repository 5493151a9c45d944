pub mod error;
pub mod list_subscriptions;
pub mod subscribe_to_meetup;
pub mod unsubscribe_from_meetup;

pub use error::SubscriptionError;
