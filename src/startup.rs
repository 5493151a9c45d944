use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;
use tracing_actix_web::TracingLogger;

use crate::db::repository::PgMeetupRepository;
use crate::email_client::EmailClient;
use crate::events;
use crate::listeners::init::init_listeners;
use crate::routes::{health_check, list_subscriptions, path_config, subscribe, unsubscribe};

/// Builds the HTTP server and spawns the background mail listener.
/// Must be called from within a tokio runtime.
pub fn run(
    listener: TcpListener,
    pg_pool: PgPool,
    email_client: EmailClient,
) -> Result<Server, std::io::Error> {
    let (event_sender, event_receiver) = events::channel(events::EVENT_QUEUE_CAPACITY);
    let repository_data = web::Data::new(PgMeetupRepository::new(pg_pool));
    let events_data = web::Data::new(event_sender);

    let _ = tokio::spawn(async move {
        init_listeners(event_receiver, &email_client).await;
    });

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .route("/subscriptions", web::get().to(list_subscriptions))
            .route("/subscriptions/{meetup_id}", web::post().to(subscribe))
            .route("/subscriptions/{meetup_id}", web::delete().to(unsubscribe))
            .app_data(path_config())
            .app_data(repository_data.clone())
            .app_data(events_data.clone())
    })
    .listen(listener)?
    .run();
    Ok(server)
}
