use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. `RUST_LOG` takes precedence over
/// the default `wawebjs=info` directive.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wawebjs=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
