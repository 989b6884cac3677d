//! Shared fixtures for integration tests.

use std::path::PathBuf;
use std::sync::Arc;

use trie_router::{PatternStore, Trie};

/// A trie with its own built-in store, isolated from the default store.
#[allow(dead_code)]
pub fn isolated_trie<V>() -> Trie<V> {
    Trie::with_store(Arc::new(PatternStore::with_builtins()))
}

/// Path of the sample route table shipped with the crate.
#[allow(dead_code)]
pub fn sample_routes() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("routes.toml")
}
