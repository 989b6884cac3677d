//! Trie vertices.

use crate::trie::pattern::{Pattern, SegmentKind};

/// Index of a node inside its trie's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// One vertex of the segment trie.
///
/// `D` is side storage owned by collaborators. The trie creates it with
/// `D::default()`, hands out references along matched paths, and never
/// inspects it.
#[derive(Debug)]
pub struct Node<V, D = ()> {
    pub(crate) pattern: Option<Pattern>,
    pub(crate) value: Option<V>,
    pub(crate) route: Option<String>,
    pub(crate) data: D,
    /// Children in match priority order.
    pub(crate) children: Vec<(SegmentKind, NodeId)>,
}

impl<V, D: Default> Node<V, D> {
    pub(crate) fn new(pattern: Option<Pattern>) -> Self {
        Self {
            pattern,
            value: None,
            route: None,
            data: D::default(),
            children: Vec::new(),
        }
    }
}

impl<V, D> Node<V, D> {
    /// Insert a child after every sibling of equal or higher precedence, so
    /// ties keep registration order.
    pub(crate) fn attach(&mut self, kind: SegmentKind, id: NodeId) {
        let at = self
            .children
            .iter()
            .position(|(existing, _)| *existing > kind)
            .unwrap_or(self.children.len());
        self.children.insert(at, (kind, id));
    }

    /// The compiled segment. `None` only for the root.
    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    /// Raw segment text this node is keyed by.
    pub fn segment(&self) -> Option<&str> {
        self.pattern.as_ref().map(Pattern::raw)
    }

    /// True iff a registered pattern ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    /// The full pattern string registered at this node.
    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
