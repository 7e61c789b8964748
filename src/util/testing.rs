//! Test logging
//!
//! [`init_test_setup`] routes `tracing` output through the test harness so it
//! only shows for failing tests. `RUST_LOG` overrides the default
//! `etlr=debug` filter.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the test subscriber once per test binary.
pub fn init_test_setup() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("etlr=debug"));
        // Another harness may already own the global subscriber
        if tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .try_init()
            .is_ok()
        {
            tracing::debug!("test logging initialised");
        }
    });
}
