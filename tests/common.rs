use std::future::Future;
use std::net::TcpListener;
use std::time::Duration;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use secrecy::ExposeSecret;
use sqlx::{Connection, PgConnection, PgPool};
use uuid::Uuid;
use wiremock::MockServer;

use meetapp::config::Config;
use meetapp::email_client::EmailClient;
use meetapp::routes::authenticated_user::USER_ID_HEADER;
use meetapp::startup::run;
use meetapp::telemetry;

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    // The sink is part of the subscriber type, hence the two branches.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = telemetry::get_subscriber(default_filter_level, std::io::stdout);
        telemetry::init_subscriber(subscriber);
    } else {
        let subscriber = telemetry::get_subscriber(default_filter_level, std::io::sink);
        telemetry::init_subscriber(subscriber);
    };
});

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub mock_server: MockServer,
    pub api_client: reqwest::Client,
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);
    let config = Config::new().expect("Failed to load config");

    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let db_name = Uuid::new_v4().to_string();
    let database_url = config.database_url.expose_secret().as_str();
    let last_slash_index = database_url
        .rfind('/')
        .expect("Malformed DATABASE_URL: could not figure out connection string without db");
    let connection_string = &database_url[0..last_slash_index];
    let db_pool = get_db_pool(connection_string, &db_name).await;

    let mock_server = MockServer::start().await;
    let email_client = EmailClient::new(
        "test@example.com",
        &mock_server.uri(),
        Duration::from_millis(1000),
        config.sendgrid_api_key.clone(),
    );

    let server = run(listener, db_pool.clone(), email_client).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address,
        db_pool,
        mock_server,
        api_client: reqwest::Client::new(),
    }
}

pub async fn get_db_pool(connection_string: &str, db_name: &str) -> PgPool {
    let mut connection = PgConnection::connect(connection_string)
        .await
        .expect("Failed to connect to Postgres");
    sqlx::query(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
        .execute(&mut connection)
        .await
        .expect("Failed to create database.");
    let database_url = format!("{}/{}", connection_string, db_name);
    let connection_pool = PgPool::connect(database_url.as_str())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");
    connection_pool
}

#[allow(dead_code)]
pub async fn eventually<F, Fut, T>(mut f: F, max_tries: u16, wait_between_tries: u16) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = anyhow::Result<T>>,
{
    let mut counter = 0;
    loop {
        match f().await {
            Ok(value) => return value,
            Err(_) if counter < max_tries => {
                counter += 1;
                tokio::time::sleep(Duration::from_millis(wait_between_tries as u64)).await;
            }
            Err(err) => panic!("Gave up after {} tries: {:?}", counter + 1, err),
        }
    }
}

#[allow(dead_code)]
impl TestApp {
    pub async fn insert_user(&self, name: &str, email: &str) -> i32 {
        sqlx::query_scalar::<_, i32>(
            r#"
                INSERT INTO users (name, email, created_at, updated_at)
                VALUES ($1, $2, NOW(), NOW())
                RETURNING id
            "#,
        )
        .bind(name)
        .bind(email)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to insert user")
    }

    pub async fn insert_meetup(&self, provider_id: i32, title: &str, date: DateTime<Utc>) -> i32 {
        sqlx::query_scalar::<_, i32>(
            r#"
                INSERT INTO meetups
                    (title, description, localization, date, provider_id, created_at, updated_at)
                VALUES ($1, 'Talks and pizza', 'Auditório', $2, $3, NOW(), NOW())
                RETURNING id
            "#,
        )
        .bind(title)
        .bind(date)
        .bind(provider_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to insert meetup")
    }

    pub async fn count_subscriptions(&self, user_id: i32) -> i64 {
        sqlx::query_scalar::<_, i64>(
            r#"SELECT COUNT(*) FROM "users-meetups" WHERE user_id = $1"#,
        )
        .bind(user_id)
        .fetch_one(&self.db_pool)
        .await
        .expect("Failed to count subscriptions")
    }

    pub async fn get_subscriptions(&self, user_id: i32) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/subscriptions", &self.address))
            .header(USER_ID_HEADER, user_id.to_string())
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_subscription(&self, user_id: i32, meetup_id: i32) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/subscriptions/{}", &self.address, meetup_id))
            .header(USER_ID_HEADER, user_id.to_string())
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_subscription(&self, user_id: i32, meetup_id: i32) -> reqwest::Response {
        self.api_client
            .delete(&format!("{}/subscriptions/{}", &self.address, meetup_id))
            .header(USER_ID_HEADER, user_id.to_string())
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_received_requests(&self) -> anyhow::Result<Vec<wiremock::Request>> {
        let requests = self.mock_server.received_requests().await.unwrap_or_default();
        if requests.is_empty() {
            anyhow::bail!("Mock server has no received requests yet")
        } else {
            Ok(requests)
        }
    }
}
