use tracing::subscriber::set_global_default;
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

/// Composes the `tracing` subscriber used by the binary and the test suites.
///
/// `RUST_LOG` takes precedence over `env_filter`; `sink` decides where the
/// formatted spans end up (stdout for the server, `std::io::sink` for quiet tests).
pub fn get_subscriber<Sink>(
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));
    let formatting_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_writer(sink);
    Registry::default().with(env_filter).with(formatting_layer)
}

/// Installs the subscriber globally. Must be called only once per process.
pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync) {
    set_global_default(subscriber).expect("Failed to set subscriber");
}
