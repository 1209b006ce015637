//! Test harness helpers.

use tracing_subscriber::EnvFilter;

/// Initialize tracing output for a test run.
///
/// Respects `RUST_LOG`; safe to call from every test - only the first call
/// installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
