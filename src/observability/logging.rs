//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for binaries
//! - Resolve the log filter from the environment or configuration
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging; the library only emits events
//! - `RUST_LOG` wins over the configured level
//! - Logs go to stderr so command output on stdout stays machine readable

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber.
///
/// Returns an error if a subscriber is already installed.
pub fn init_logging(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_for(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}

/// Filter applying `level` to this crate only.
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::new(format!("trie_router={level}"))
}

