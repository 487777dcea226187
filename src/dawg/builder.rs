use std::collections::HashMap;

use crate::dawg::error::BuilderError;
use crate::dawg::node::{Node, NodeId};
use crate::dawg::query::Dawg;
use crate::dawg::reachable_closure;

#[derive(Debug, PartialEq, Eq)]
enum State {
    Accumulating,
    Finalized,
}

/// Builds a minimal DAWG from a lexicographically non-decreasing stream of words,
/// using the Daciuk-Mihov-Watson-Watson incremental minimization algorithm: after
/// every insert, every node that isn't on the path of the most recently inserted word
/// is already a committed, shared representative of its equivalence class.
pub struct Builder {
    nodes: Vec<Node>,
    register: HashMap<String, NodeId>,
    last_word: Vec<char>,
    /// spine[i] is the node reached after the first `i` characters of `last_word`.
    spine: Vec<NodeId>,
    state: State,
}

impl Builder {
    pub fn new() -> Self {
        let root = NodeId::new(0);
        Builder {
            nodes: vec![Node::new()],
            register: HashMap::new(),
            last_word: Vec::new(),
            spine: vec![root],
            state: State::Accumulating,
        }
    }

    fn new_node(&mut self) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new());
        id
    }

    /// Inserts `word`. Words must be inserted in strictly increasing lexicographic
    /// order (over `char`, which for well-formed UTF-8 agrees with byte order); a word
    /// that is less than or equal to the previous one is rejected as `OutOfOrder`.
    pub fn insert(&mut self, word: &str) -> Result<(), BuilderError> {
        if self.state == State::Finalized {
            return Err(BuilderError::AlreadyFinished);
        }
        if word.is_empty() {
            return Err(BuilderError::EmptyWord);
        }

        let last_word: String = self.last_word.iter().collect();
        if word <= last_word.as_str() {
            return Err(BuilderError::OutOfOrder {
                word: word.to_string(),
                last_word,
            });
        }

        let word_chars: Vec<char> = word.chars().collect();
        let common_prefix_len = self
            .last_word
            .iter()
            .zip(word_chars.iter())
            .take_while(|(a, b)| a == b)
            .count();

        self.minimize(common_prefix_len);

        // spine[0..=common_prefix_len] survives minimize untouched; extend it with
        // fresh nodes for the diverging suffix of `word`.
        self.spine.truncate(common_prefix_len + 1);
        let mut node = *self.spine.last().unwrap();
        for &label in &word_chars[common_prefix_len..] {
            let next = self.new_node();
            self.nodes[node.index()].set_edge(label, next);
            self.spine.push(next);
            node = next;
        }
        self.nodes[node.index()].set_terminal(true);

        self.last_word = word_chars;
        Ok(())
    }

    /// Walks the spine from its end down to (but not including) index `down_to`,
    /// hash-consing each node into the register or replacing it with its existing
    /// representative. After this call every node at spine index > `down_to` is either
    /// committed or has been dropped in favor of a committed representative.
    fn minimize(&mut self, down_to: usize) {
        for i in (down_to + 1..self.spine.len()).rev() {
            let parent = self.spine[i - 1];
            let child = self.spine[i];
            let label = self.last_word[i - 1];

            let sig = self.nodes[child.index()].signature();
            match self.register.get(&sig) {
                Some(&representative) => {
                    self.nodes[parent.index()].set_edge(label, representative);
                }
                None => {
                    self.register.insert(sig, child);
                }
            }
        }
    }

    /// Minimizes the final spine and returns the immutable DAWG. Calling `insert` or
    /// `finish` again afterwards returns `AlreadyFinished`.
    pub fn finish(&mut self) -> Result<Dawg, BuilderError> {
        if self.state == State::Finalized {
            return Err(BuilderError::AlreadyFinished);
        }
        self.minimize(0);
        self.state = State::Finalized;

        let root = self.spine[0];
        let nodes = std::mem::take(&mut self.nodes);
        let (nodes, root) = reachable_closure(&nodes, root);
        Ok(Dawg::from_parts(nodes, root))
    }
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_order_insert_rejected() {
        let mut builder = Builder::new();
        builder.insert("zoo").unwrap();
        let err = builder.insert("moo").unwrap_err();
        assert!(matches!(err, BuilderError::OutOfOrder { .. }));
    }

    #[test]
    fn duplicate_word_is_out_of_order() {
        let mut builder = Builder::new();
        builder.insert("cat").unwrap();
        let err = builder.insert("cat").unwrap_err();
        assert!(matches!(err, BuilderError::OutOfOrder { .. }));
    }

    #[test]
    fn empty_word_rejected() {
        let mut builder = Builder::new();
        assert_eq!(builder.insert("").unwrap_err(), BuilderError::EmptyWord);
    }

    #[test]
    fn cannot_use_builder_after_finish() {
        let mut builder = Builder::new();
        builder.insert("cat").unwrap();
        builder.finish().unwrap();
        assert_eq!(
            builder.insert("dog").unwrap_err(),
            BuilderError::AlreadyFinished
        );
        assert_eq!(builder.finish().unwrap_err(), BuilderError::AlreadyFinished);
    }

    #[test]
    fn doggy_builds_a_straight_line_path() {
        // "doggy" alone: no merges happen, so the finished DAWG is a straight path and
        // its node signatures match node.rs's signature test.
        let mut builder = Builder::new();
        builder.insert("doggy").unwrap();
        let dawg = builder.finish().unwrap();
        assert_eq!(dawg.node_count(), 6);
        assert!(dawg.contains("doggy"));
        assert!(!dawg.contains("dog"));
    }

    #[test]
    fn small_lexicon_minimization_merges_shared_suffixes() {
        let mut builder = Builder::new();
        for w in ["cat", "catch", "cats"] {
            builder.insert(w).unwrap();
        }
        builder.finish().unwrap();

        let mut signatures: Vec<String> =
            builder.register.keys().cloned().collect();
        signatures.sort();

        let mut expected = vec!["0_a2_", "0_t3_", "0_h5_", "1_c4_s5_", "1_"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        expected.sort();

        assert_eq!(signatures, expected);
    }

    #[test]
    fn larger_lexicon_minimization_merges_shared_suffixes() {
        let words = [
            "cache", "car", "cat", "catch", "cats", "dog", "doggy", "dogs",
        ];
        let mut builder = Builder::new();
        for w in words {
            builder.insert(w).unwrap();
        }
        builder.finish().unwrap();

        let mut signatures: Vec<String> =
            builder.register.keys().cloned().collect();
        signatures.sort();

        let mut expected: Vec<String> = vec![
            "0_a2_", "0_h4_", "0_h5_", "0_e5_", "0_y5_", "0_c3_r5_t7_", "1_c8_s5_",
            "0_o12_", "0_g13_", "1_g14_s5_", "1_",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        expected.sort();

        assert_eq!(signatures, expected);
    }

    #[test]
    fn minimality_no_two_reachable_nodes_share_a_signature() {
        let words = [
            "cache", "car", "cat", "catch", "cats", "dog", "doggy", "dogs",
        ];
        let mut builder = Builder::new();
        for w in words {
            builder.insert(w).unwrap();
        }
        let dawg = builder.finish().unwrap();

        let mut signatures: Vec<String> =
            dawg.nodes().iter().map(|n| n.signature()).collect();
        let before = signatures.len();
        signatures.sort();
        signatures.dedup();
        assert_eq!(signatures.len(), before, "minimality violated");
    }

    #[test]
    fn acyclicity_and_determinism() {
        let words = ["a", "ab", "abc", "b", "ba"];
        let mut builder = Builder::new();
        for w in words {
            builder.insert(w).unwrap();
        }
        let dawg = builder.finish().unwrap();

        // Every node's outgoing labels are distinct (guaranteed by BTreeMap), and a DFS
        // from the root never revisits a node on the current stack.
        fn dfs(dawg: &Dawg, node: NodeId, stack: &mut Vec<NodeId>) {
            assert!(!stack.contains(&node), "cycle detected at {node:?}");
            stack.push(node);
            let mut labels = Vec::new();
            for (label, target) in dawg.nodes()[node.index()].edges() {
                assert!(!labels.contains(&label), "duplicate edge label {label}");
                labels.push(label);
                dfs(dawg, target, stack);
            }
            stack.pop();
        }
        dfs(&dawg, dawg.root(), &mut Vec::new());
    }

    #[test]
    fn order_enforcement_first_violation_reported() {
        let words = ["a", "c", "b", "d"];
        let mut builder = Builder::new();
        let mut failed_at = None;
        for (i, w) in words.iter().enumerate() {
            if builder.insert(w).is_err() {
                failed_at = Some(i);
                break;
            }
        }
        assert_eq!(failed_at, Some(2));
    }
}
