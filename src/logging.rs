//! Log output setup for binaries and tests.

use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs a `tracing` fmt subscriber writing to stderr, filtered by
/// `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset or invalid. Calling it again
/// after a subscriber is installed does nothing.
///
/// # Examples
///
/// ```
/// tasks::init_logging();
/// tasks::init_logging();
/// ```
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Like [`init_logging`], but routes output through the test harness so it
/// is captured per test and shown only for failures.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_test_writer()
        .try_init();
}
