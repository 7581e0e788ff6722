//! Whole-graph snapshots
//!
//! A snapshot holds every node in insertion order and every edge in insertion
//! order. Replaying it rebuilds the adjacency lists and the reverse index
//! exactly, dangling edges included.

use crate::config::GraphConfig;
use crate::graph::{Edge, GraphError, GraphNode, GraphStore, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Current snapshot layout version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Snapshot errors
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Unsupported snapshot version {0}")]
    UnsupportedVersion(u32),

    #[error("Attribute {key} of node {node} is not a finite number and cannot be written as JSON")]
    NonFiniteAttribute { node: NodeId, key: String },
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Encoding used for snapshot bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapshotFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// bincode
    Binary,
}

impl SnapshotFormat {
    /// Format named by a file extension (`.json`, `.bin`, `.snapshot`)
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(SnapshotFormat::Json),
            "bin" | "snapshot" => Some(SnapshotFormat::Binary),
            _ => None,
        }
    }

    /// Format for `path`, or `fallback` when the extension names none
    pub fn for_path(path: impl AsRef<Path>, fallback: SnapshotFormat) -> Self {
        Self::from_path(path).unwrap_or(fallback)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown snapshot format: {0}")]
pub struct ParseSnapshotFormatError(String);

impl FromStr for SnapshotFormat {
    type Err = ParseSnapshotFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(SnapshotFormat::Json),
            "binary" | "bin" | "bincode" => Ok(SnapshotFormat::Binary),
            _ => Err(ParseSnapshotFormatError(s.to_string())),
        }
    }
}

impl fmt::Display for SnapshotFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SnapshotFormat::Json => "json",
            SnapshotFormat::Binary => "binary",
        })
    }
}

/// Serializable copy of a graph store's contents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub version: u32,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    /// Encode the snapshot
    ///
    /// JSON has no NaN or infinity, so a JSON encode fails on attributes
    /// holding them instead of writing `null`. Binary keeps them.
    pub fn encode(&self, format: SnapshotFormat) -> SnapshotResult<Vec<u8>> {
        let bytes = match format {
            SnapshotFormat::Json => {
                self.check_finite_attributes()?;
                serde_json::to_vec_pretty(self)?
            }
            SnapshotFormat::Binary => bincode::serialize(self)?,
        };
        Ok(bytes)
    }

    fn check_finite_attributes(&self) -> SnapshotResult<()> {
        for node in &self.nodes {
            if let Some((key, _)) = node.attributes.iter().find(|(_, value)| !value.is_finite()) {
                return Err(SnapshotError::NonFiniteAttribute {
                    node: node.id.clone(),
                    key: key.clone(),
                });
            }
        }
        Ok(())
    }

    /// Decode snapshot bytes, rejecting versions this build cannot read
    pub fn decode(bytes: &[u8], format: SnapshotFormat) -> SnapshotResult<Self> {
        let snapshot: GraphSnapshot = match format {
            SnapshotFormat::Json => serde_json::from_slice(bytes)?,
            SnapshotFormat::Binary => bincode::deserialize(bytes)?,
        };

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }
        Ok(snapshot)
    }
}

impl GraphStore {
    /// Copy all nodes and edges into a snapshot
    pub fn to_snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            version: SNAPSHOT_VERSION,
            nodes: self.nodes().cloned().collect(),
            edges: self.edges_in_insertion_order().cloned().collect(),
        }
    }

    /// Rebuild a store from a snapshot
    ///
    /// Nodes are validated; edges are restored as recorded, so edges that
    /// were dangling when saved are dangling again regardless of `config`.
    pub fn from_snapshot(snapshot: GraphSnapshot, config: GraphConfig) -> SnapshotResult<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SnapshotError::UnsupportedVersion(snapshot.version));
        }

        let mut store = GraphStore::with_config(config);
        for node in snapshot.nodes {
            store.restore_node(node)?;
        }
        for edge in snapshot.edges {
            if !edge.weight.is_finite() {
                return Err(GraphError::InvalidWeight(edge.weight).into());
            }
            store.push_edge(edge);
        }

        debug!(
            "Restored {} nodes and {} edges from snapshot",
            store.node_count(),
            store.edge_count()
        );
        Ok(store)
    }
}

/// Write a snapshot of `store` to `path`
pub fn save_snapshot(
    store: &GraphStore,
    path: impl AsRef<Path>,
    format: SnapshotFormat,
) -> SnapshotResult<()> {
    let path = path.as_ref();
    let bytes = store.to_snapshot().encode(format)?;

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(&bytes)?;
    writer.flush()?;

    info!(
        "Saved snapshot ({} nodes, {} edges, {}) to {}",
        store.node_count(),
        store.edge_count(),
        format,
        path.display()
    );
    Ok(())
}

/// Read a snapshot from `path` into a new store
pub fn load_snapshot(
    path: impl AsRef<Path>,
    format: SnapshotFormat,
    config: GraphConfig,
) -> SnapshotResult<GraphStore> {
    let path = path.as_ref();

    let mut bytes = Vec::new();
    BufReader::new(File::open(path)?).read_to_end(&mut bytes)?;

    let store = GraphStore::from_snapshot(GraphSnapshot::decode(&bytes, format)?, config)?;
    info!(
        "Loaded snapshot ({} nodes, {} edges, {}) from {}",
        store.node_count(),
        store.edge_count(),
        format,
        path.display()
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{AttributeValue, RelationType};

    fn sample() -> GraphStore {
        let mut store = GraphStore::new();
        store
            .add_node(GraphNode::new("uid_dog", "dog").with_attribute("legs", 4i64))
            .unwrap();
        store
            .add_node(GraphNode::new("uid_animal", "animal").with_type("concept"))
            .unwrap();
        store.add_edge("uid_dog", "uid_animal", RelationType::IsA).unwrap();
        store
            .add_weighted_edge("uid_animal", "uid_dog", RelationType::HasPart, 0.5)
            .unwrap();
        store
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(SnapshotFormat::from_path("g.json"), Some(SnapshotFormat::Json));
        assert_eq!(SnapshotFormat::from_path("g.BIN"), Some(SnapshotFormat::Binary));
        assert_eq!(SnapshotFormat::from_path("g.snapshot"), Some(SnapshotFormat::Binary));
        assert_eq!(SnapshotFormat::from_path("g.txt"), None);
        assert_eq!(SnapshotFormat::from_path("graph"), None);
        assert_eq!(
            SnapshotFormat::for_path("graph", SnapshotFormat::Binary),
            SnapshotFormat::Binary
        );
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<SnapshotFormat>().unwrap(), SnapshotFormat::Json);
        assert_eq!("bin".parse::<SnapshotFormat>().unwrap(), SnapshotFormat::Binary);
        assert!("yaml".parse::<SnapshotFormat>().is_err());
    }

    #[test]
    fn test_snapshot_contents() {
        let snapshot = sample().to_snapshot();

        assert_eq!(snapshot.version, SNAPSHOT_VERSION);
        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.nodes[0].id.as_str(), "uid_dog");
        assert_eq!(snapshot.edges.len(), 2);
        assert_eq!(snapshot.edges[1].weight, 0.5);
    }

    #[test]
    fn test_restore_in_both_formats() {
        let store = sample();

        for format in [SnapshotFormat::Json, SnapshotFormat::Binary] {
            let bytes = store.to_snapshot().encode(format).unwrap();
            let decoded = GraphSnapshot::decode(&bytes, format).unwrap();
            let restored = GraphStore::from_snapshot(decoded, GraphConfig::default()).unwrap();

            assert_eq!(restored.to_snapshot(), store.to_snapshot());
            assert_eq!(restored.get_stats(), store.get_stats());
            assert_eq!(
                restored.get_incoming_edges("uid_dog", None)[0].relation,
                RelationType::HasPart
            );
        }
    }

    #[test]
    fn test_unsupported_version() {
        let mut snapshot = sample().to_snapshot();
        snapshot.version = 99;

        let bytes = snapshot.encode(SnapshotFormat::Json).unwrap();
        assert!(matches!(
            GraphSnapshot::decode(&bytes, SnapshotFormat::Json),
            Err(SnapshotError::UnsupportedVersion(99))
        ));
        assert!(matches!(
            GraphStore::from_snapshot(snapshot, GraphConfig::default()),
            Err(SnapshotError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_invalid_node_in_snapshot() {
        let mut snapshot = sample().to_snapshot();
        snapshot.nodes.push(GraphNode::new(" ", "blank"));

        assert!(matches!(
            GraphStore::from_snapshot(snapshot, GraphConfig::default()),
            Err(SnapshotError::Graph(GraphError::InvalidNode(_)))
        ));
    }

    #[test]
    fn test_nested_non_finite_attribute_blocks_json() {
        let mut store = sample();
        let nested = AttributeValue::Array(vec![
            AttributeValue::Float(0.5),
            AttributeValue::Float(f64::NAN),
        ]);
        store.set_node_attribute("uid_animal", "samples", nested).unwrap();

        let snapshot = store.to_snapshot();
        assert!(matches!(
            snapshot.encode(SnapshotFormat::Json),
            Err(SnapshotError::NonFiniteAttribute { ref key, .. }) if key == "samples"
        ));
        assert!(snapshot.encode(SnapshotFormat::Binary).is_ok());
    }

    #[test]
    fn test_garbage_bytes() {
        assert!(matches!(
            GraphSnapshot::decode(b"not a snapshot", SnapshotFormat::Json),
            Err(SnapshotError::Json(_))
        ));
        assert!(GraphSnapshot::decode(&[1, 2, 3], SnapshotFormat::Binary).is_err());
    }
}
