//! Request dispatch on top of the segment trie.
//!
//! # Data Flow
//! ```text
//! (method, path)
//!     → trie.match_path (handler, params, hook chain)
//!     → before hooks, root-most node first
//!     → handler for method (405 if none)
//!     → after hooks, root-most node first
//!     → Response
//! ```
//!
//! # Design Decisions
//! - The trie stores a `Handler` per pattern and `Hooks` as node side storage
//! - Hooks attach to any existing node, including prefixes such as `/`,
//!   so they apply to every route below it
//! - Registration is `&mut self`; `dispatch` is `&self` and lock-free

pub mod context;
pub mod handler;
pub mod table;

use std::sync::Arc;

use thiserror::Error;

use crate::trie::{Matched, PatternStore, Trie, TrieError};

pub use context::{Context, Response};
pub use handler::{Handler, HandlerFn, Hooks, Method};

/// Errors raised while building a router.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error(transparent)]
    Trie(#[from] TrieError),

    /// Hooks were attached to a pattern that has no node.
    #[error("no node for pattern `{0}`")]
    UnknownPattern(String),

    #[error("unsupported method `{0}`")]
    UnknownMethod(String),
}

/// Method-aware dispatcher with layered hooks.
#[derive(Debug, Default)]
pub struct Router {
    trie: Trie<Handler, Hooks>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router resolving placeholder types through `store`.
    pub fn with_store(store: Arc<PatternStore>) -> Self {
        Self {
            trie: Trie::with_store(store),
        }
    }

    pub fn set_delimiter(&mut self, delimiter: &str) -> Result<(), RouterError> {
        Ok(self.trie.set_delimiter(delimiter)?)
    }

    /// Bind a complete handler to `pattern`.
    pub fn route(&mut self, pattern: &str, handler: Handler) -> Result<(), RouterError> {
        Ok(self.trie.put(pattern, handler)?)
    }

    /// Bind `f` to `method` on `pattern`, merging into the pattern's handler
    /// if one is already registered.
    pub fn on<F>(&mut self, method: Method, pattern: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        if let Some(handler) = self
            .trie
            .get_node_mut(pattern)
            .and_then(|node| node.value_mut())
        {
            handler.set(method, f);
            return Ok(());
        }
        self.route(pattern, Handler::new().on(method, f))
    }

    pub fn get<F>(&mut self, pattern: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.on(Method::Get, pattern, f)
    }

    pub fn post<F>(&mut self, pattern: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.on(Method::Post, pattern, f)
    }

    pub fn put<F>(&mut self, pattern: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.on(Method::Put, pattern, f)
    }

    pub fn patch<F>(&mut self, pattern: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.on(Method::Patch, pattern, f)
    }

    pub fn delete<F>(&mut self, pattern: &str, f: F) -> Result<(), RouterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.on(Method::Delete, pattern, f)
    }

    /// Run `hook` before the handler of every route at or below `pattern`.
    pub fn before<F>(&mut self, pattern: &str, hook: F) -> Result<(), RouterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.hooks_mut(pattern)?.push_before(Arc::new(hook));
        Ok(())
    }

    /// Run `hook` after the handler of every route at or below `pattern`.
    pub fn after<F>(&mut self, pattern: &str, hook: F) -> Result<(), RouterError>
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.hooks_mut(pattern)?.push_after(Arc::new(hook));
        Ok(())
    }

    /// Resolve `path` without dispatching.
    pub fn lookup(&self, path: &str) -> Option<Matched<'_, Handler, Hooks>> {
        self.trie.match_path(path)
    }

    pub fn trie(&self) -> &Trie<Handler, Hooks> {
        &self.trie
    }

    /// Route one request and run its hooks and handler.
    pub fn dispatch(&self, method: &str, path: &str) -> Response {
        let Some(matched) = self.trie.match_path(path) else {
            tracing::debug!(method, path, "No route matched");
            return Response::from_status(404);
        };
        tracing::debug!(method, path, pattern = matched.pattern(), "Dispatching request");

        let mut ctx = Context::new(method, path, matched.params().clone());
        for hooks in matched.chain() {
            for hook in hooks.before() {
                hook(&mut ctx);
            }
        }

        match method.parse::<Method>() {
            Ok(method) => matched.value().handle(method, &mut ctx),
            Err(_) => ctx.reject(405),
        }

        for hooks in matched.chain() {
            for hook in hooks.after() {
                hook(&mut ctx);
            }
        }
        ctx.into_response()
    }

    fn hooks_mut(&mut self, pattern: &str) -> Result<&mut Hooks, RouterError> {
        match self.trie.get_node_mut(pattern) {
            Some(node) => Ok(node.data_mut()),
            None => {
                tracing::warn!(pattern, "Hook attached to unknown pattern");
                Err(RouterError::UnknownPattern(pattern.to_string()))
            }
        }
    }
}
