//! Test logging setup.

use tracing::Level;

/// Route `tracing` output through the test harness's captured stdout.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .with_target(false)
        .try_init();
}
