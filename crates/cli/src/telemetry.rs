use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the stderr log subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    // a second init (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "vqpix=info,vqpix_kernel=info,vqpix_pixmap=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
