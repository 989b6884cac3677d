//! Segment trie subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     pattern string
//!     → tree.rs (split by delimiter)
//!     → pattern.rs (compile each new segment, types from store.rs)
//!     → node.rs (lazy vertex creation, terminal mark, payload)
//!
//! Lookup:
//!     request path
//!     → tree.rs (split, descend by sibling priority)
//!     → pattern.rs (match segment, extract params)
//!     → Matched { value, params, side-storage chain } or None
//! ```
//!
//! # Design Decisions
//! - Registration takes `&mut self`, lookup `&self`: register everything,
//!   then share the trie (e.g. via `Arc`) for concurrent lookups
//! - Deterministic precedence: literal > typed > wildcard, then registration order
//! - Malformed patterns are returned as errors, never panics

pub mod error;
pub mod node;
pub mod pattern;
pub mod store;
pub mod tree;

pub use error::{TrieError, TrieResult};
pub use node::{Node, NodeId};
pub use pattern::{Pattern, SegmentKind};
pub use store::{default_store, register_pattern, set_default_pattern, PatternStore};
pub use tree::{Matched, Trie, DEFAULT_DELIMITER};
