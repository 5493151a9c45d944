use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::error::TrySendError;

use crate::domain::Mailbox;
use crate::email_client::{EmailClient, MailMessage, MailTemplate};
use crate::events::EventSender;

pub const SUBSCRIPTION_MAIL_SUBJECT: &str = "Nova inscrição no Meetup";

/// Emitted once a user has been linked to a meetup; the provider gets notified.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionCreated {
    pub provider: Mailbox,
    pub meetup_title: String,
    pub user_name: String,
}

impl SubscriptionCreated {
    pub fn mail_message(&self) -> MailMessage {
        MailMessage {
            to: self.provider.clone(),
            subject: SUBSCRIPTION_MAIL_SUBJECT.to_owned(),
            template: MailTemplate::Subscription {
                meetup: self.meetup_title.clone(),
                provider: self.provider.name.clone(),
                user: self.user_name.clone(),
            },
        }
    }

    /// Delivery failures are logged and dropped; the subscription stands.
    #[tracing::instrument(
        name = "Processing SubscriptionCreated event",
        skip(email_client, event),
        fields(
            meetup = %event.meetup_title,
            provider = %event.provider,
        )
    )]
    pub async fn process(email_client: &EmailClient, event: SubscriptionCreated) {
        match email_client.send_mail(&event.mail_message()).await {
            Ok(_) => {
                tracing::info!("SubscriptionCreated event email sent")
            }
            Err(err) => {
                tracing::error!(error = ?err, "Failed to send SubscriptionCreated event mail")
            }
        }
    }

    /// Never waits: a full queue drops the event instead of stalling the request.
    #[tracing::instrument(name = "Publish SubscriptionCreated event", skip(events))]
    pub fn publish(events: &EventSender, event: SubscriptionCreated) -> anyhow::Result<()> {
        events.try_send(event).map_err(|err| match err {
            TrySendError::Full(_) => {
                anyhow::anyhow!("The SubscriptionCreated queue is full, event dropped")
            }
            TrySendError::Closed(_) => anyhow::anyhow!("The SubscriptionCreated listener is gone"),
        })
    }
}
