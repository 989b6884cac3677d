//! Per-pattern handlers and hook lists.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::router::context::Context;
use crate::router::RouterError;

/// Request handler or hook function.
pub type HandlerFn = Arc<dyn Fn(&mut Context) + Send + Sync>;

/// Methods the dispatcher knows how to route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub const ALL: [Method; 5] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = RouterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| RouterError::UnknownMethod(s.to_string()))
    }
}

/// Handler functions bound to one pattern, keyed by method.
#[derive(Clone, Default)]
pub struct Handler {
    funcs: HashMap<Method, HandlerFn>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Handler::set`].
    pub fn on<F>(mut self, method: Method, f: F) -> Self
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.set(method, f);
        self
    }

    /// Bind `f` to `method`, replacing any previous function.
    pub fn set<F>(&mut self, method: Method, f: F)
    where
        F: Fn(&mut Context) + Send + Sync + 'static,
    {
        self.funcs.insert(method, Arc::new(f));
    }

    /// Methods with a bound function, in declaration order.
    pub fn methods(&self) -> Vec<Method> {
        let mut methods: Vec<_> = self.funcs.keys().copied().collect();
        methods.sort();
        methods
    }

    /// Run the function bound to `method`, or answer 405.
    pub fn handle(&self, method: Method, ctx: &mut Context) {
        match self.funcs.get(&method) {
            Some(f) => f(ctx),
            None => ctx.reject(405),
        }
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("methods", &self.methods())
            .finish()
    }
}

/// Ordered hooks attached to one trie node.
///
/// On dispatch, `before` hooks of every node on the matched path run
/// root-most first, then the handler, then the `after` hooks in the same
/// order.
#[derive(Clone, Default)]
pub struct Hooks {
    before: Vec<HandlerFn>,
    after: Vec<HandlerFn>,
}

impl Hooks {
    pub fn push_before(&mut self, hook: HandlerFn) {
        self.before.push(hook);
    }

    pub fn push_after(&mut self, hook: HandlerFn) {
        self.after.push(hook);
    }

    pub fn before(&self) -> &[HandlerFn] {
        &self.before
    }

    pub fn after(&self) -> &[HandlerFn] {
        &self.after
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before", &self.before.len())
            .field("after", &self.after.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parse() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("patch".parse::<Method>().unwrap(), Method::Patch);
        assert!(matches!(
            "TRACE".parse::<Method>(),
            Err(RouterError::UnknownMethod(ref m)) if m == "TRACE"
        ));
        assert_eq!(Method::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_handler_missing_method() {
        let handler = Handler::new().on(Method::Get, |ctx| ctx.write_str("ok"));
        assert_eq!(handler.methods(), [Method::Get]);

        let mut ctx = Context::new("POST", "/", Default::default());
        handler.handle(Method::Post, &mut ctx);
        let response = ctx.into_response();
        assert_eq!(response.status, 405);
        assert_eq!(response.body, "Method Not Allowed");
    }
}
