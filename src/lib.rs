//! Segment-trie path router.
//!
//! Registers slash-delimited path patterns with literal segments, typed
//! placeholders (`<id:int>`) and trailing wildcards (`<path:*>`), and resolves
//! request paths against them with deterministic precedence.

pub mod config;
pub mod observability;
pub mod router;
pub mod trie;

pub use config::RouteTableConfig;
pub use router::{Context, Handler, Method, Response, Router, RouterError};
pub use trie::{
    register_pattern, set_default_pattern, Matched, Pattern, PatternStore, Trie, TrieError,
};
