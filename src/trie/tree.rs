//! Segment trie: registration and lookup.
//!
//! # Responsibilities
//! - Split patterns and paths into segments by the delimiter
//! - Register patterns, creating nodes lazily
//! - Structural lookup by raw pattern text (`has`, `get`, `get_node`)
//! - Dynamic lookup of request paths (`match_path`)
//!
//! # Design Decisions
//! - Nodes live in an arena (`Vec<Node>`); children are indices
//! - Sibling precedence: literal, then typed, then wildcard; ties keep
//!   registration order
//! - Lookup commits to the first accepted sibling; a dead end is not-found
//! - Registration compiles every new segment before touching the tree

use std::collections::HashMap;
use std::sync::Arc;

use crate::trie::error::{TrieError, TrieResult};
use crate::trie::node::{Node, NodeId};
use crate::trie::pattern::Pattern;
use crate::trie::store::{default_store, PatternStore};

/// Default segment delimiter.
pub const DEFAULT_DELIMITER: &str = "/";

const ROOT: NodeId = NodeId(0);

/// Extracted values of one accepted node.
type Step = (NodeId, Vec<(String, String)>);

/// Outcome of a successful [`Trie::match_path`].
#[derive(Debug)]
pub struct Matched<'a, V, D = ()> {
    pattern: &'a str,
    value: &'a V,
    params: HashMap<String, String>,
    chain: Vec<&'a D>,
}

impl<'a, V, D> Matched<'a, V, D> {
    /// The registered pattern string that matched.
    pub fn pattern(&self) -> &'a str {
        self.pattern
    }

    pub fn value(&self) -> &'a V {
        self.value
    }

    /// Parameters merged across all segments; deeper segments win.
    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Side storage of every node on the matched path, root-most first.
    pub fn chain(&self) -> &[&'a D] {
        &self.chain
    }

    pub fn into_params(self) -> HashMap<String, String> {
        self.params
    }
}

/// A prefix tree of path patterns keyed by segment.
///
/// `V` is the value bound to each registered pattern and `D` the per-node
/// side storage exposed through [`Trie::get_node_mut`] and [`Matched::chain`].
#[derive(Debug)]
pub struct Trie<V, D = ()> {
    nodes: Vec<Node<V, D>>,
    delimiter: String,
    store: Option<Arc<PatternStore>>,
}

impl<V, D: Default> Trie<V, D> {
    /// Create a trie that resolves placeholder types through the
    /// process-wide default store.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(None)],
            delimiter: DEFAULT_DELIMITER.to_string(),
            store: None,
        }
    }

    /// Create a trie bound to a caller-supplied pattern store.
    pub fn with_store(store: Arc<PatternStore>) -> Self {
        Self {
            store: Some(store),
            ..Self::new()
        }
    }

    /// Set the segment delimiter. Call before registering patterns.
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) -> TrieResult<()> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(TrieError::EmptyDelimiter);
        }
        self.delimiter = delimiter;
        Ok(())
    }

    /// Register `pattern` with `value`.
    ///
    /// Fails without modifying the tree if the pattern is already registered
    /// or any of its segments is malformed.
    pub fn put(&mut self, pattern: &str, value: V) -> TrieResult<()> {
        if pattern.is_empty() {
            return Err(TrieError::malformed(pattern, "pattern is empty"));
        }
        let parts: Vec<String> = self.split(pattern).into_iter().map(str::to_owned).collect();

        let mut current = ROOT;
        let mut depth = 0;
        while let Some(next) = parts.get(depth).and_then(|part| self.child(current, part)) {
            current = next;
            depth += 1;
        }

        if depth == parts.len() && self.nodes[current.0].is_terminal() {
            tracing::warn!(pattern, "Rejected duplicate pattern");
            return Err(TrieError::DuplicatePattern(pattern.to_string()));
        }

        let store = self.store.clone().unwrap_or_else(default_store);
        let compiled = parts[depth..]
            .iter()
            .map(|part| Pattern::with_store(part, &store))
            .collect::<TrieResult<Vec<_>>>()?;

        for segment in compiled {
            current = self.push_child(current, segment);
        }

        let node = &mut self.nodes[current.0];
        node.value = Some(value);
        node.route = Some(pattern.to_string());
        tracing::debug!(pattern, segments = parts.len(), "Registered pattern");
        Ok(())
    }
}

impl<V, D: Default> Default for Trie<V, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, D> Trie<V, D> {
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// True iff a node chain with exactly the segments of `pattern` exists.
    ///
    /// Prefixes of registered patterns count; use [`Trie::get`] to ask
    /// whether `pattern` itself carries a value.
    pub fn has(&self, pattern: &str) -> bool {
        self.find(pattern).is_some()
    }

    /// Value registered under exactly `pattern`.
    pub fn get(&self, pattern: &str) -> Option<&V> {
        self.find(pattern).and_then(|id| self.nodes[id.0].value())
    }

    /// Node reached by following `pattern` segment by segment.
    ///
    /// The node need not be terminal: prefixes of registered patterns are
    /// addressable so side storage can be attached at any depth.
    pub fn get_node(&self, pattern: &str) -> Option<&Node<V, D>> {
        self.find(pattern).map(|id| &self.nodes[id.0])
    }

    pub fn get_node_mut(&mut self, pattern: &str) -> Option<&mut Node<V, D>> {
        let id = self.find(pattern)?;
        self.nodes.get_mut(id.0)
    }

    /// Resolve a request path.
    ///
    /// Returns `None` unless some registered pattern consumes the whole path.
    pub fn match_path(&self, path: &str) -> Option<Matched<'_, V, D>> {
        let parts = self.split(path);
        let mut trail = Vec::with_capacity(parts.len());
        let end = self.descend(&parts, &mut trail)?;
        let node = &self.nodes[end.0];

        let mut params = HashMap::new();
        let mut chain = Vec::with_capacity(trail.len());
        for (id, values) in trail {
            chain.push(&self.nodes[id.0].data);
            params.extend(values);
        }

        Some(Matched {
            pattern: node.route.as_deref().unwrap_or_default(),
            value: node.value.as_ref()?,
            params,
            chain,
        })
    }

    /// Registered patterns and their values, depth first in match priority.
    pub fn patterns(&self) -> Vec<(&str, &V)> {
        let mut out = Vec::new();
        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if let (Some(route), Some(value)) = (node.route(), node.value()) {
                out.push((route, value));
            }
            stack.extend(node.children.iter().rev().map(|(_, child)| *child));
        }
        out
    }

    /// Number of registered patterns.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_terminal()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn split<'a>(&'a self, text: &'a str) -> Vec<&'a str> {
        let delimiter = self.delimiter.as_str();
        let mut parts: Vec<&str> = text.trim_end_matches(delimiter).split(delimiter).collect();
        if text.starts_with(delimiter) {
            parts[0] = delimiter;
        }
        parts
    }

    fn child(&self, parent: NodeId, segment: &str) -> Option<NodeId> {
        self.nodes[parent.0]
            .children
            .iter()
            .map(|(_, id)| *id)
            .find(|id| {
                self.nodes[id.0]
                    .pattern
                    .as_ref()
                    .is_some_and(|p| p.equal_to_literal(segment))
            })
    }

    fn find(&self, pattern: &str) -> Option<NodeId> {
        if pattern.is_empty() {
            return None;
        }
        self.split(pattern)
            .into_iter()
            .try_fold(ROOT, |current, part| self.child(current, part))
    }

    fn descend(&self, parts: &[&str], trail: &mut Vec<Step>) -> Option<NodeId> {
        let mut at = ROOT;
        for (depth, segment) in parts.iter().enumerate() {
            let last = depth + 1 == parts.len();
            let (id, mut values) = self.nodes[at.0].children.iter().find_map(|&(_, id)| {
                let child = &self.nodes[id.0];
                if last && !child.is_terminal() {
                    return None;
                }
                let values = child.pattern.as_ref()?.matches(segment)?;
                Some((id, values))
            })?;

            if self.nodes[id.0].pattern.as_ref().is_some_and(Pattern::match_everything) {
                if let Some((_, value)) = values.first_mut() {
                    for part in &parts[depth + 1..] {
                        value.push_str(&self.delimiter);
                        value.push_str(part);
                    }
                }
                trail.push((id, values));
                return Some(id);
            }

            trail.push((id, values));
            at = id;
        }
        Some(at)
    }
}

impl<V, D: Default> Trie<V, D> {
    fn push_child(&mut self, parent: NodeId, pattern: Pattern) -> NodeId {
        let id = NodeId(self.nodes.len());
        let kind = pattern.kind();
        self.nodes.push(Node::new(Some(pattern)));
        self.nodes[parent.0].attach(kind, id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie() -> Trie<&'static str> {
        Trie::with_store(Arc::new(PatternStore::with_builtins()))
    }

    #[test]
    fn test_split_pattern() {
        let t = trie();
        assert_eq!(t.split("/"), ["/"]);
        assert_eq!(t.split("a/b"), ["a", "b"]);
        assert_eq!(t.split("/a/b/c/"), ["/", "a", "b", "c"]);
        assert_eq!(t.split("a/b/"), ["a", "b"]);
    }

    #[test]
    fn test_put_and_has() {
        let mut t = trie();
        t.put("/", "root").unwrap();
        t.put("/hi", "hi").unwrap();
        t.put("a/b/c", "a-b-c").unwrap();

        assert!(t.has("/"));
        assert!(t.has("/hi"));
        assert!(t.has("a/b/c"));
        assert!(t.has("a/b"));
        assert!(t.get("a/b").is_none());
        assert!(!t.has("a/c"));
        assert!(!t.has("/missing"));
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn test_duplicate_keeps_first_value() {
        let mut t = trie();
        t.put("/users/<id:int>", "first").unwrap();
        let err = t.put("/users/<id:int>", "second").unwrap_err();
        assert!(matches!(err, TrieError::DuplicatePattern(_)));
        assert_eq!(t.get("/users/<id:int>"), Some(&"first"));
    }

    #[test]
    fn test_prefix_registered_after_longer_pattern() {
        let mut t = trie();
        t.put("/hello/world", "world").unwrap();
        assert!(t.has("/hello"));
        assert!(t.get_node("/hello").is_some());
        assert!(t.match_path("/hello").is_none());
        t.put("/hello", "hello").unwrap();
        assert!(t.put("/hello", "again").is_err());
        assert_eq!(t.match_path("/hello").unwrap().value(), &"hello");
        assert_eq!(t.match_path("/hello/world").unwrap().value(), &"world");
    }

    #[test]
    fn test_malformed_put_leaves_tree_untouched() {
        let mut t = trie();
        t.put("/a", "a").unwrap();
        let err = t.put("/a/b/<broken", "x").unwrap_err();
        assert!(matches!(err, TrieError::MalformedPattern { .. }));
        assert!(t.get_node("/a/b").is_none());
        assert_eq!(t.get_node("/a").unwrap().child_count(), 0);
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let mut t = trie();
        assert!(t.put("", "empty").is_err());
        assert!(t.is_empty());
        assert!(t.match_path("").is_none());
    }

    #[test]
    fn test_match_literal_and_params() {
        let mut t = trie();
        t.put("/", "root").unwrap();
        t.put("/hello/world", "helloworld").unwrap();
        t.put("/hello/<name:str>", "hello-name").unwrap();

        let m = t.match_path("/").unwrap();
        assert_eq!(m.value(), &"root");
        assert!(m.params().is_empty());

        let m = t.match_path("/hello/world").unwrap();
        assert_eq!(m.value(), &"helloworld");

        let m = t.match_path("/hello/jiaju").unwrap();
        assert_eq!(m.value(), &"hello-name");
        assert_eq!(m.param("name"), Some("jiaju"));
        assert_eq!(m.pattern(), "/hello/<name:str>");
    }

    #[test]
    fn test_non_terminal_last_segment_rejected() {
        let mut t = trie();
        t.put("/a/b/c", "abc").unwrap();
        assert!(t.match_path("/a/b").is_none());
    }

    #[test]
    fn test_literal_precedence_over_typed() {
        let mut t = trie();
        t.put("/items/<id:int>", "typed").unwrap();
        t.put("/items/123", "literal").unwrap();
        t.put("/items/<rest:*>", "wildcard").unwrap();

        assert_eq!(t.match_path("/items/123").unwrap().value(), &"literal");
        assert_eq!(t.match_path("/items/7").unwrap().value(), &"typed");
        assert_eq!(t.match_path("/items/x/y").unwrap().value(), &"wildcard");
    }

    #[test]
    fn test_registration_order_breaks_ties() {
        let mut t = trie();
        t.put("/p/<a>", "first").unwrap();
        t.put("/p/<b:str>", "second").unwrap();
        let m = t.match_path("/p/x").unwrap();
        assert_eq!(m.value(), &"first");
        assert_eq!(m.param("a"), Some("x"));
    }

    #[test]
    fn test_commits_to_first_accepted_sibling() {
        let mut t = trie();
        t.put("/a/b/c", "literal").unwrap();
        t.put("/a/<x>/d", "typed").unwrap();
        assert!(t.match_path("/a/b/d").is_none());
        assert_eq!(t.match_path("/a/b/c").unwrap().chain().len(), 4);

        let m = t.match_path("/a/z/d").unwrap();
        assert_eq!(m.value(), &"typed");
        assert_eq!(m.param("x"), Some("z"));
    }

    #[test]
    fn test_wildcard_rejoins_rest() {
        let mut t = trie();
        t.put("/file/<filename:*>", "file").unwrap();
        let m = t.match_path("/file/static/css/site.css").unwrap();
        assert_eq!(m.param("filename"), Some("static/css/site.css"));

        let m = t.match_path("/file/readme").unwrap();
        assert_eq!(m.param("filename"), Some("readme"));
    }

    #[test]
    fn test_wildcard_short_circuits_remaining_depth() {
        let mut t = trie();
        t.put("/a/<p:*>/b", "inner").unwrap();
        t.put("/a/<p:*>", "outer").unwrap();
        let m = t.match_path("/a/x/b").unwrap();
        assert_eq!(m.value(), &"outer");
        assert_eq!(m.param("p"), Some("x/b"));
        assert_eq!(m.chain().len(), 3);
    }

    #[test]
    fn test_non_terminal_wildcard_swallows_path() {
        let mut t = trie();
        t.put("/a/<p:*>/b", "inner").unwrap();
        assert!(t.match_path("/a/x/b").is_none());
        assert!(t.match_path("/a/x").is_none());
    }

    #[test]
    fn test_deeper_param_wins() {
        let mut t = trie();
        t.put("/<id>/child/<id:int>", "nested").unwrap();
        let m = t.match_path("/outer/child/42").unwrap();
        assert_eq!(m.param("id"), Some("42"));
    }

    #[test]
    fn test_custom_delimiter() {
        let mut t = trie();
        t.set_delimiter(".").unwrap();
        t.put("a.b.<name:*>", "dotted").unwrap();
        let m = t.match_path("a.b.c.d").unwrap();
        assert_eq!(m.param("name"), Some("c.d"));
        assert!(matches!(t.set_delimiter(""), Err(TrieError::EmptyDelimiter)));
    }

    #[test]
    fn test_get_node_side_storage() {
        let store = Arc::new(PatternStore::with_builtins());
        let mut t: Trie<&str, Vec<&str>> = Trie::with_store(store);
        t.put("/api/users", "users").unwrap();
        t.get_node_mut("/").unwrap().data_mut().push("root-hook");
        t.get_node_mut("/api/users").unwrap().data_mut().push("users-hook");

        let m = t.match_path("/api/users").unwrap();
        let chain: Vec<_> = m.chain().iter().map(|d| d.as_slice()).collect();
        let expected: [&[&str]; 3] = [&["root-hook"], &[], &["users-hook"]];
        assert_eq!(chain, expected);
        assert!(t.get_node("/api/<id>").is_none());
    }

    #[test]
    fn test_patterns_listing_in_priority_order() {
        let mut t = trie();
        t.put("/b/<x>", "typed").unwrap();
        t.put("/b/lit", "literal").unwrap();
        t.put("/a", "a").unwrap();
        let listed: Vec<_> = t.patterns().into_iter().map(|(p, _)| p).collect();
        assert_eq!(listed, ["/b/lit", "/b/<x>", "/a"]);
    }
}
