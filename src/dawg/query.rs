use crate::dawg::node::{Node, NodeId};

/// An immutable Directed Acyclic Word Graph.
///
/// Produced by [`Builder::finish`](crate::dawg::builder::Builder::finish) or
/// [`codec::load`](crate::dawg::codec::load). Holds its arena by value and never mutates
/// it, so a `Dawg` is `Send + Sync` for free and may be queried from any number of
/// threads at once.
#[derive(Debug, Clone)]
pub struct Dawg {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Dawg {
    pub(crate) fn from_parts(nodes: Vec<Node>, root: NodeId) -> Self {
        Dawg { nodes, root }
    }

    /// True iff `word` is exactly one of the inserted words.
    pub fn contains(&self, word: &str) -> bool {
        match self.walk(word) {
            Some(id) => self.nodes[id.index()].is_terminal(),
            None => false,
        }
    }

    /// True iff some inserted word begins with `prefix` (including `prefix` itself).
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.walk(prefix).is_some()
    }

    /// Follows the edges labelled by `s`'s characters from the root. `None` if any
    /// label is absent along the way; `Some(root)` for the empty string.
    fn walk(&self, s: &str) -> Option<NodeId> {
        let mut cur = self.root;
        for ch in s.chars() {
            cur = self.nodes[cur.index()].edge(ch)?;
        }
        Some(cur)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub(crate) fn nodes(&self) -> &[Node] {
        &self.nodes
    }
}
