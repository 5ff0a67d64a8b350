// Library root. Exposes the scraper's modules for integration tests in
// `tests/`; the binary entry point is `src/main.rs`.

pub mod error;
pub mod extractor;
pub mod height;
pub mod scraper;
pub mod services;
pub mod stats;
pub mod store;

// Only needed by the binary, public so tests can reach them.
pub mod cli;
pub mod config;
pub mod logging;
