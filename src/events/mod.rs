use tokio::sync::mpsc;

use crate::events::subscription_created::SubscriptionCreated;

pub mod subscription_created;

/// Events waiting for the listener; publishing beyond this drops the event.
pub const EVENT_QUEUE_CAPACITY: usize = 1024;

pub type EventSender = mpsc::Sender<SubscriptionCreated>;
pub type EventReceiver = mpsc::Receiver<SubscriptionCreated>;

pub fn channel(capacity: usize) -> (EventSender, EventReceiver) {
    mpsc::channel(capacity)
}
