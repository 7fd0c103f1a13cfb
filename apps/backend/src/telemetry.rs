//! Tracing setup for the backend binary. One JSON line per event.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Baseline when no filter env is set: app at info, DB layers quieted.
const DEFAULT_DIRECTIVES: &str = "info,backend=info,sqlx=warn,sea_orm=warn";

/// `GENIE_LOG` overrides `RUST_LOG`; both override the baseline.
fn build_filter() -> EnvFilter {
    std::env::var("GENIE_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(build_filter())
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn genie_log_takes_precedence_over_rust_log() {
        std::env::set_var("GENIE_LOG", "debug");
        std::env::set_var("RUST_LOG", "error");

        let filter = build_filter().to_string();
        assert!(filter.contains("debug"));
        assert!(!filter.contains("error"));

        std::env::remove_var("GENIE_LOG");
        std::env::remove_var("RUST_LOG");
    }

    #[test]
    #[serial]
    fn baseline_quiets_database_layers() {
        std::env::remove_var("GENIE_LOG");
        std::env::remove_var("RUST_LOG");

        let filter = build_filter().to_string();
        assert!(filter.contains("sqlx=warn"));
        assert!(filter.contains("sea_orm=warn"));
        assert!(filter.contains("backend=info"));
    }
}
