//! Logging utilities for the coderelay crates.
//!
//! Installs a `tracing` subscriber with a formatted layer and an
//! `EnvFilter`. When `RUST_LOG` is set it decides the filter alone; otherwise
//! the level passed to [`init_with_level`] applies to the relay crates.

use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Crate targets that receive the default directive.
const RELAY_TARGETS: &[&str] = &["coderelay_backend", "coderelay_relay", "coderelay_config", "coderelay_common"];

/// Initialize the tracing subscriber at INFO.
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific log level.
///
/// Safe to call more than once: if a global subscriber is already set the
/// call is a no-op.
pub fn init_with_level(level: Level) {
    let filter = build_filter(level, std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref());

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_thread_names(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Filter from explicit directives, or the relay defaults when there are none
/// or they fail to parse.
fn build_filter(level: Level, directives: Option<&str>) -> EnvFilter {
    if let Some(filter) = directives.and_then(|d| EnvFilter::try_new(d).ok()) {
        return filter;
    }

    let mut filter = EnvFilter::new("warn");
    for target in RELAY_TARGETS {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}
