use tracing_subscriber::{fmt, EnvFilter};

/// Initialize structured logging for the scraper.
///
/// Logs go to stderr so stdout only carries the report. Call once from
/// `main`; `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    tracing::debug!("Logging initialized");
}
