//! Registry of placeholder types.
//!
//! # Responsibilities
//! - Map a short type name (`int`, `str`, ...) to a regex fragment
//! - Supply a default fragment for untyped or unknown placeholders
//! - Hold the process-wide default store used when a trie has no store of its own
//!
//! # Design Decisions
//! - Fragments are stored wrapped as a capturing group: `\d+` becomes `(\d+)`
//! - The shared store is an `ArcSwap` snapshot; registration is copy-on-write
//!   so concurrent readers never block

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use arc_swap::ArcSwap;
use regex::Regex;

use crate::trie::error::{TrieError, TrieResult};

/// Type name of the wildcard placeholder.
pub const WILDCARD: &str = "*";

/// Fragment produced by the library default factory: one or more word characters.
pub const DEFAULT_FRAGMENT: &str = r"(\w+)";

type DefaultFactory = Arc<dyn Fn() -> String + Send + Sync>;

static DEFAULT_STORE: LazyLock<ArcSwap<PatternStore>> =
    LazyLock::new(|| ArcSwap::from_pointee(PatternStore::with_builtins()));

/// Maps placeholder type names to regular expression fragments.
#[derive(Clone)]
pub struct PatternStore {
    patterns: HashMap<String, String>,
    default_pattern: DefaultFactory,
}

impl PatternStore {
    /// Create an empty store whose default fragment is [`DEFAULT_FRAGMENT`].
    pub fn new() -> Self {
        Self {
            patterns: HashMap::new(),
            default_pattern: Arc::new(|| DEFAULT_FRAGMENT.to_string()),
        }
    }

    /// Create a store holding the built-in `str`, `int` and `*` types.
    pub fn with_builtins() -> Self {
        let mut store = Self::new();
        for (name, fragment) in [("str", r"\w+"), ("int", r"\d+"), (WILDCARD, ".+")] {
            store
                .patterns
                .insert(name.to_string(), format!("({fragment})"));
        }
        store
    }

    /// Register a new placeholder type.
    ///
    /// Fails with [`TrieError::DuplicateName`] if `name` exists, leaving the
    /// store untouched.
    pub fn register(&mut self, name: impl Into<String>, fragment: &str) -> TrieResult<()> {
        let name = name.into();
        if self.patterns.contains_key(&name) {
            return Err(TrieError::DuplicateName(name));
        }
        let wrapped = format!("({fragment})");
        Regex::new(&wrapped).map_err(|source| TrieError::InvalidRegex {
            pattern: name.clone(),
            source,
        })?;
        self.patterns.insert(name, wrapped);
        Ok(())
    }

    /// Fragment registered for `name`, or the default fragment when `name` is
    /// empty or unknown.
    pub fn get_pattern(&self, name: &str) -> String {
        match self.patterns.get(name) {
            Some(fragment) if !name.is_empty() => fragment.clone(),
            _ => (self.default_pattern)(),
        }
    }

    /// Replace the factory used for untyped and unknown placeholders.
    pub fn set_default_pattern<F>(&mut self, factory: F)
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        self.default_pattern = Arc::new(factory);
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.patterns.contains_key(name)
    }
}

impl Default for PatternStore {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for PatternStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.patterns.keys().collect();
        names.sort();
        f.debug_struct("PatternStore").field("patterns", &names).finish()
    }
}

/// Snapshot of the process-wide default store.
pub fn default_store() -> Arc<PatternStore> {
    DEFAULT_STORE.load_full()
}

/// Register a placeholder type in the process-wide default store.
///
/// Tries created without an explicit store pick the new type up on their
/// next registration.
pub fn register_pattern(name: &str, fragment: &str) -> TrieResult<()> {
    let mut outcome = Ok(());
    DEFAULT_STORE.rcu(|current| {
        let mut next = PatternStore::clone(current);
        outcome = next.register(name, fragment);
        next
    });
    if outcome.is_ok() {
        tracing::debug!(name, fragment, "Registered pattern type");
    }
    outcome
}

/// Replace the default-fragment factory of the process-wide default store.
///
/// Affects untyped and unknown placeholders compiled afterwards; existing
/// tries keep the fragments they were built with.
pub fn set_default_pattern<F>(factory: F)
where
    F: Fn() -> String + Send + Sync + 'static,
{
    let factory: DefaultFactory = Arc::new(factory);
    DEFAULT_STORE.rcu(|current| {
        let mut next = PatternStore::clone(current);
        next.default_pattern = Arc::clone(&factory);
        next
    });
    tracing::debug!("Replaced default pattern factory");
}
