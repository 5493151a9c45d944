use std::net::TcpListener;

use meetapp::config::Config;
use meetapp::db;
use meetapp::email_client::EmailClient;
use meetapp::startup::run;
use meetapp::telemetry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::get_subscriber("info".into(), std::io::stdout);
    telemetry::init_subscriber(subscriber);

    let config = Config::new()?;

    tracing::info!("Connecting to Postgres");
    let connection_pool = db::create_pool(&config).await?;
    db::migrate(&connection_pool).await?;

    let email_client = EmailClient::from_config(&config);

    let address = config.address();
    tracing::info!("Listening on {}", address);
    let listener = TcpListener::bind(address)?;
    run(listener, connection_pool, email_client)?.await?;
    Ok(())
}
