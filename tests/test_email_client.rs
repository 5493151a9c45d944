use std::time::Duration;

use claim::{assert_err, assert_ok};
use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use secrecy::Secret;
use serde_json::{from_slice, Value};
use wiremock::matchers::{any, header, header_exists, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use meetapp::domain::{Mailbox, UserEmail};
use meetapp::email_client::{EmailClient, MailMessage, MailTemplate};

struct MatchSendEmailBody;

impl Match for MatchSendEmailBody {
    fn matches(&self, request: &Request) -> bool {
        let result: Result<Value, _> = from_slice(&request.body);
        if let Ok(body) = result {
            body.get("from").is_some()
                && body.get("personalizations").is_some()
                && body.get("subject").is_some()
                && body.get("content").is_some()
                && body["personalizations"][0]["to"][0].get("name").is_some()
        } else {
            false
        }
    }
}

#[tokio::test]
async fn send_mail_posts_the_rendered_template() {
    // Arrange
    let mock_server = MockServer::start().await;
    Mock::given(path("/mail/send"))
        .and(method("POST"))
        .and(header("content-type", "application/json"))
        .and(header_exists("authorization"))
        .and(MatchSendEmailBody)
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    // Act
    let email_client = create_email_client(&mock_server, 1000);
    let outcome = email_client.send_mail(&random_message()).await;

    // Assert
    assert_ok!(outcome);
}

#[tokio::test]
async fn send_mail_fails_when_the_server_returns_500() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let email_client = create_email_client(&mock_server, 1000);
    let outcome = email_client.send_mail(&random_message()).await;

    assert_err!(outcome);
}

#[tokio::test]
async fn fails_when_sending_takes_too_long() {
    let mock_server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(180)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let email_client = create_email_client(&mock_server, 100);
    let outcome = email_client.send_mail(&random_message()).await;

    assert_err!(outcome);
}

#[test]
fn the_subscription_template_mentions_meetup_and_user() {
    let template = MailTemplate::Subscription {
        meetup: "Rust Floripa".into(),
        provider: "Diego".into(),
        user: "Ursula".into(),
    };
    assert_eq!(template.name(), "subscription");
    let text = template.render();
    assert!(text.starts_with("Olá Diego"));
    assert!(text.contains("Ursula"));
    assert!(text.contains("\"Rust Floripa\""));
}

fn random_message() -> MailMessage {
    let name: String = Name().fake();
    MailMessage {
        to: Mailbox {
            name: name.clone(),
            email: UserEmail::parse(SafeEmail().fake()).unwrap(),
        },
        subject: Sentence(1..2).fake(),
        template: MailTemplate::Subscription {
            meetup: Sentence(1..3).fake(),
            provider: name,
            user: Name().fake(),
        },
    }
}

fn create_email_client(mock_server: &MockServer, timeout_millis: u64) -> EmailClient {
    EmailClient::new(
        SafeEmail().fake::<String>().as_str(),
        &mock_server.uri(),
        Duration::from_millis(timeout_millis),
        Secret::new("sendgrid-key".to_string()),
    )
}
