//! Tracing subscriber setup for binaries and demos embedding the client.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

/// Install a global fmt subscriber filtered by `config.level`.
///
/// A bare level such as `debug` is scoped to this crate so dependencies stay
/// quiet; anything containing `=` or `,` is used as a full filter directive.
/// Returns `false` when a global subscriber was already installed.
pub fn init(config: &LoggingConfig) -> bool {
    tracing_subscriber::registry()
        .with(EnvFilter::new(filter_directive(&config.level)))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}

fn filter_directive(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        level.to_string()
    } else {
        format!("book_listing={}", level)
    }
}
