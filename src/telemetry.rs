use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global `fmt` subscriber, filtered by `RUST_LOG` or `default_filter`.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
