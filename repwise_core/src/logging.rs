//! Tracing setup shared by every Repwise binary.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber with an `info` default.
///
/// `RUST_LOG` overrides the default filter when set.
pub fn init() {
    init_with_level("info")
}

/// Install the global subscriber with the given default level
/// (`debug`, `info`, `warn`, `error`). `RUST_LOG` still wins when set.
pub fn init_with_level(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

/// Route log output through the test harness so it shows up on failure
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
