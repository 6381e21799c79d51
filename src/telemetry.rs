//! Tracing setup and span constructors.

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. `RUST_LOG` overrides the default
/// `info` filter.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();
}

/// Standardized span constructors.
pub mod spans {
    use tracing::{Span, debug_span, info_span};

    /// Span covering one server connection.
    pub fn session(host: &str, port: u16) -> Span {
        info_span!("session", host = %host, port = port)
    }

    /// Span covering the dispatch of one received line.
    pub fn line(command: &str) -> Span {
        debug_span!("line", command = %command)
    }
}
