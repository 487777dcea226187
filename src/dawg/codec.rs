use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dawg::error::CodecError;
use crate::dawg::node::{Node, NodeId};
use crate::dawg::query::Dawg;
use crate::dawg::reachable_closure;

/// Distinguishes a real `.dawg` blob from arbitrary bytes and guards against loading a
/// file written by an incompatible future format.
const MAGIC: u32 = 0x44_41_57_47; // b"DAWG" read as a big-endian u32.
const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct NodeDescriptor {
    terminal: bool,
    /// `(code point, child slot)` pairs, already in label-ascending order because
    /// they come straight out of [`Node::edges`]'s `BTreeMap` iteration.
    edges: Vec<(u32, u32)>,
}

#[derive(Serialize, Deserialize)]
struct Record {
    magic: u32,
    version: u32,
    root: u32,
    nodes: Vec<NodeDescriptor>,
}

/// Flattens `dawg` to a self-describing binary blob and writes it to `path`, truncating
/// any existing file. See [`load`] for the inverse.
pub fn save<P: AsRef<Path>>(dawg: &Dawg, path: P) -> Result<(), CodecError> {
    // Re-run the reachable/dense-slot pass even though a `Dawg` is already compact: it's
    // the one place that fixes the deterministic slot order the format promises.
    let (nodes, root) = reachable_closure(dawg.nodes(), dawg.root());

    let descriptors = nodes
        .iter()
        .map(|node| NodeDescriptor {
            terminal: node.is_terminal(),
            edges: node
                .edges()
                .map(|(label, target)| (label as u32, target.index() as u32))
                .collect(),
        })
        .collect();

    let record = Record {
        magic: MAGIC,
        version: FORMAT_VERSION,
        root: root.index() as u32,
        nodes: descriptors,
    };

    let file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    let mut writer = BufWriter::new(file);
    bincode::serialize_into(&mut writer, &record)
        .map_err(|e| CodecError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;
    std::io::Write::flush(&mut writer)?;
    Ok(())
}

/// Reads a blob written by [`save`] and reconstructs an equivalent `Dawg`. Node
/// identities are not preserved, only the membership/prefix behavior.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Dawg, CodecError> {
    let file = fs::OpenOptions::new().read(true).open(path)?;
    let reader = BufReader::new(file);
    let record: Record =
        bincode::deserialize_from(reader).map_err(|e| CodecError::Decode(e.to_string()))?;

    if record.magic != MAGIC {
        return Err(CodecError::Decode(format!(
            "bad magic {:#010x}, expected {:#010x}",
            record.magic, MAGIC
        )));
    }
    if record.version != FORMAT_VERSION {
        return Err(CodecError::Decode(format!(
            "unsupported format version {} (expected {})",
            record.version, FORMAT_VERSION
        )));
    }
    let slot_count = record.nodes.len();
    if record.root as usize >= slot_count {
        return Err(CodecError::Decode("root slot out of range".to_string()));
    }

    let mut nodes = vec![Node::new(); slot_count];
    for (slot, descriptor) in record.nodes.iter().enumerate() {
        nodes[slot].set_terminal(descriptor.terminal);
        for &(code_point, target) in &descriptor.edges {
            let label = char::from_u32(code_point)
                .ok_or_else(|| CodecError::Decode(format!("invalid code point {code_point}")))?;
            if target as usize >= slot_count {
                return Err(CodecError::Decode("edge target out of range".to_string()));
            }
            nodes[slot].set_edge(label, NodeId::new(target as usize));
        }
    }

    Ok(Dawg::from_parts(nodes, NodeId::new(record.root as usize)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dawg::builder::Builder;
    use tempfile::NamedTempFile;

    fn build(words: &[&str]) -> Dawg {
        let mut builder = Builder::new();
        for w in words {
            builder.insert(w).unwrap();
        }
        builder.finish().unwrap()
    }

    #[test]
    fn round_trip_preserves_membership_and_prefixes() {
        let words = [
            "cache", "car", "cat", "catch", "cats", "dog", "doggy", "dogs",
        ];
        let dawg = build(&words);

        let file = NamedTempFile::new().unwrap();
        save(&dawg, file.path()).unwrap();
        let loaded = load(file.path()).unwrap();

        let probes = [
            "cache", "car", "cat", "catch", "cats", "dog", "doggy", "dogs", "do", "doggo",
            "ca", "cars", "", "z",
        ];
        for probe in probes {
            assert_eq!(
                dawg.contains(probe),
                loaded.contains(probe),
                "contains mismatch for {probe:?}"
            );
            assert_eq!(
                dawg.starts_with(probe),
                loaded.starts_with(probe),
                "starts_with mismatch for {probe:?}"
            );
        }
    }

    #[test]
    fn round_trip_preserves_non_ascii_labels() {
        let dawg = build(&["café", "cafés"]);
        let file = NamedTempFile::new().unwrap();
        save(&dawg, file.path()).unwrap();
        let loaded = load(file.path()).unwrap();
        assert!(loaded.contains("café"));
        assert!(loaded.contains("cafés"));
        assert!(!loaded.contains("caf"));
    }

    #[test]
    fn empty_dawg_round_trips() {
        let dawg = build(&[]);
        let file = NamedTempFile::new().unwrap();
        save(&dawg, file.path()).unwrap();
        let loaded = load(file.path()).unwrap();
        assert_eq!(loaded.node_count(), 1);
        assert!(!loaded.contains("anything"));
        assert!(loaded.starts_with(""));
    }

    #[test]
    fn load_rejects_garbage_bytes() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"not a dawg").unwrap();
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }

    #[test]
    fn load_rejects_missing_file() {
        let err = load("/nonexistent/path/does/not/exist.dawg").unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }

    #[test]
    fn load_rejects_bad_magic() {
        let record = Record {
            magic: 0xDEAD_BEEF,
            version: FORMAT_VERSION,
            root: 0,
            nodes: vec![NodeDescriptor {
                terminal: true,
                edges: vec![],
            }],
        };
        let file = NamedTempFile::new().unwrap();
        bincode::serialize_into(file.reopen().unwrap(), &record).unwrap();
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));
    }
}
