use crate::email_client::EmailClient;
use crate::events::subscription_created::SubscriptionCreated;
use crate::events::EventReceiver;

/// Drains the event queue until every sender has been dropped.
pub async fn init_listeners(mut events: EventReceiver, email_client: &EmailClient) {
    tracing::info!("SubscriptionCreated listener started");
    while let Some(event) = events.recv().await {
        SubscriptionCreated::process(email_client, event).await;
    }
    tracing::info!("SubscriptionCreated listener stopped");
}
