//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! trie / router / config produce:
//!     → tracing events (registration, dispatch, rejected input)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, env or config filtered)
//! ```

pub mod logging;

pub use logging::init_logging;
