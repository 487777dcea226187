use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Handle into a [`Builder`](crate::dawg::builder::Builder) or [`Dawg`](crate::dawg::query::Dawg)
/// arena. Doubles as the "build-time identity" used by [`Node::signature`]: two nodes
/// minted at different points in the build always carry distinct ids, and a node's id
/// never changes once it exists, so it is a stable stand-in for pointer identity.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A vertex in the word graph: a terminal flag plus labelled outgoing edges.
///
/// Edges are kept in a `BTreeMap` rather than a `HashMap` so that [`signature`](Node::signature)
/// never has to sort: `BTreeMap` iterates its entries in key order for free.
#[derive(Clone, Debug, Default)]
pub struct Node {
    terminal: bool,
    edges: BTreeMap<char, NodeId>,
}

impl Node {
    pub fn new() -> Self {
        Node::default()
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn set_terminal(&mut self, terminal: bool) {
        self.terminal = terminal;
    }

    pub fn edge(&self, label: char) -> Option<NodeId> {
        self.edges.get(&label).copied()
    }

    pub fn set_edge(&mut self, label: char, target: NodeId) {
        self.edges.insert(label, target);
    }

    pub fn edges(&self) -> impl Iterator<Item = (char, NodeId)> + '_ {
        self.edges.iter().map(|(&label, &target)| (label, target))
    }

    /// Canonical encoding of (terminal, sorted edge labels + child ids), used by the
    /// builder's register as a hash-cons key. Two nodes are equivalent, *assuming their
    /// children are already committed representatives*, iff their signatures match.
    ///
    /// Format: `"1_"` or `"0_"` for the terminal flag, then `<label><child-id>_` per
    /// edge in ascending label order.
    pub fn signature(&self) -> String {
        let mut sig = String::from(if self.terminal { "1_" } else { "0_" });
        for (label, target) in self.edges() {
            sig.push(label);
            let _ = write!(sig, "{}_", target.index());
        }
        sig
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-builds the straight-line path for "doggy" with ids assigned depth-first
    /// 0..=5 from the root, and checks each node's signature.
    #[test]
    fn signature_encoding_for_a_straight_line_word() {
        let ids: Vec<NodeId> = (0..=5).map(NodeId::new).collect();
        let mut nodes: Vec<Node> = (0..6).map(|_| Node::new()).collect();
        for (i, label) in "doggy".chars().enumerate() {
            nodes[i].set_edge(label, ids[i + 1]);
        }
        nodes[5].set_terminal(true);

        assert_eq!(nodes[0].signature(), "0_d1_");
        assert_eq!(nodes[1].signature(), "0_o2_");
        assert_eq!(nodes[2].signature(), "0_g3_");
        assert_eq!(nodes[3].signature(), "0_g4_");
        assert_eq!(nodes[4].signature(), "0_y5_");
        assert_eq!(nodes[5].signature(), "1_");
    }

    #[test]
    fn signature_distinguishes_terminal_flag() {
        let a = Node::new();
        let mut b = Node::new();
        b.set_terminal(true);
        assert_ne!(a.signature(), b.signature());
    }

    #[test]
    fn signature_orders_edges_by_label() {
        let mut node = Node::new();
        node.set_edge('z', NodeId::new(3));
        node.set_edge('a', NodeId::new(2));
        assert_eq!(node.signature(), "0_a2_z3_");
    }
}
