//! Test logging initialization for integration tests.
//!
//! Integration tests cannot reach the crate's test-only bootstrap module, so
//! the same one-time initializer lives here. Level precedence: `TEST_LOG`,
//! then `RUST_LOG`, then `"warn"`.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Automatically initialize logging for every integration test binary that
/// links this module.
#[ctor::ctor]
fn _auto_init_for_integration_tests() {
    init();
}
