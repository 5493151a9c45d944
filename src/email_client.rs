use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::config::Config;
use crate::domain::Mailbox;

/// A template together with the values it is rendered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailTemplate {
    Subscription {
        meetup: String,
        provider: String,
        user: String,
    },
}

impl MailTemplate {
    pub fn name(&self) -> &'static str {
        match self {
            MailTemplate::Subscription { .. } => "subscription",
        }
    }

    pub fn render(&self) -> String {
        match self {
            MailTemplate::Subscription {
                meetup,
                provider,
                user,
            } => format!(
                "Olá {},\n\n\
                {} acabou de se inscrever no seu meetup \"{}\".\n",
                provider, user, meetup
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MailMessage {
    pub to: Mailbox,
    pub subject: String,
    pub template: MailTemplate,
}

pub struct EmailClient {
    http_client: Client,
    sender: String,
    base_url: String,
    timeout: Duration,
    sendgrid_api_key: Secret<String>,
}

/// Body of `POST /mail/send`.
#[derive(Serialize)]
struct MailSendBody<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct Content<'a> {
    r#type: &'a str,
    value: &'a str,
}

impl EmailClient {
    pub fn new(
        sender: &str,
        base_url: &str,
        timeout: Duration,
        sendgrid_api_key: Secret<String>,
    ) -> Self {
        Self {
            http_client: Client::new(),
            sender: sender.to_owned(),
            base_url: base_url.to_owned(),
            timeout,
            sendgrid_api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.email_client_sender_email,
            &config.email_client_base_url,
            Duration::from_millis(config.email_client_timeout_millis),
            config.sendgrid_api_key.clone(),
        )
    }

    #[tracing::instrument(
        name = "Send email",
        skip(self, message),
        fields(
            recipient = %message.to,
            template = message.template.name(),
        )
    )]
    pub async fn send_mail(&self, message: &MailMessage) -> anyhow::Result<()> {
        let url = format!("{}/mail/send", &self.base_url);
        let text_content = message.template.render();
        let body = MailSendBody {
            personalizations: [Personalization {
                to: [Address {
                    email: message.to.email.as_str(),
                    name: Some(&message.to.name),
                }],
            }],
            from: Address {
                email: &self.sender,
                name: None,
            },
            subject: &message.subject,
            content: [Content {
                r#type: "text/plain",
                value: &text_content,
            }],
        };
        self.http_client
            .post(&url)
            .bearer_auth(self.sendgrid_api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .context("Failed to reach the email API")?
            .error_for_status()
            .context("The email API rejected the message")?;
        Ok(())
    }
}
