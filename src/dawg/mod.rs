//! The DAWG subsystem: node model, incremental-minimization builder, immutable query
//! structure, and binary codec. See each submodule for its piece of the contract.

pub mod builder;
pub mod codec;
pub mod error;
pub mod node;
pub mod query;

pub use builder::Builder;
pub use error::{BuilderError, CodecError};
pub use node::{Node, NodeId};
pub use query::Dawg;

use std::collections::{HashMap, VecDeque};

/// Restricts `nodes` to those reachable from `root` and renumbers them densely,
/// preserving the relative order of their original ids. For a fresh [`Builder::finish`]
/// this discards nodes retired by minimization; for an already-compact [`Dawg`] it is a
/// no-op traversal. Shared by the builder (to drop dead arena slots) and the codec (to
/// assign deterministic slot indices for serialization).
pub(crate) fn reachable_closure(nodes: &[Node], root: NodeId) -> (Vec<Node>, NodeId) {
    let mut seen = vec![false; nodes.len()];
    seen[root.index()] = true;
    let mut queue = VecDeque::from([root]);
    let mut reachable = vec![root];
    while let Some(id) = queue.pop_front() {
        for (_, target) in nodes[id.index()].edges() {
            if !seen[target.index()] {
                seen[target.index()] = true;
                reachable.push(target);
                queue.push_back(target);
            }
        }
    }
    reachable.sort_by_key(|id| id.index());

    let old_to_new: HashMap<NodeId, NodeId> = reachable
        .iter()
        .enumerate()
        .map(|(new_idx, &old_id)| (old_id, NodeId::new(new_idx)))
        .collect();

    let new_nodes = reachable
        .iter()
        .map(|&old_id| {
            let old_node = &nodes[old_id.index()];
            let mut new_node = Node::new();
            new_node.set_terminal(old_node.is_terminal());
            for (label, target) in old_node.edges() {
                new_node.set_edge(label, old_to_new[&target]);
            }
            new_node
        })
        .collect();

    (new_nodes, old_to_new[&root])
}
