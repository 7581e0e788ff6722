//! Santok Graph
//!
//! An in-memory knowledge graph store for a cognitive engine. Concepts and
//! entities are nodes keyed by caller-chosen ids; typed, weighted, directed
//! relations connect them. The store answers neighbourhood lookups, shortest
//! path queries and aggregate statistics.
//!
//! # Modules
//!
//! - [`graph`]: data model (`GraphNode`, `Edge`, `RelationType`) and `GraphStore`
//! - [`algo`]: path searches over a CSR projection of the store
//! - [`persistence`]: JSON and binary snapshots
//! - [`config`]: store policies and tooling configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use santok_graph::graph::{GraphNode, GraphStore, RelationType};
//!
//! let mut store = GraphStore::new();
//!
//! store.add_node(GraphNode::new("uid_dog", "dog")).unwrap();
//! store.add_node(GraphNode::new("uid_animal", "animal").with_type("concept")).unwrap();
//! store.add_node(GraphNode::new("uid_cat", "cat")).unwrap();
//!
//! store.add_edge("uid_dog", "uid_animal", RelationType::IsA).unwrap();
//! store.add_edge("uid_cat", "uid_animal", RelationType::IsA).unwrap();
//!
//! let path = store.find_path("uid_dog", "uid_cat", None).unwrap();
//! assert_eq!(path.len(), 3);
//!
//! let stats = store.get_stats();
//! assert_eq!(stats.node_type_count("entity"), 2);
//! assert_eq!(stats.relation_count(RelationType::IsA), 2);
//! ```

pub mod algo;
pub mod config;
pub mod graph;
pub mod persistence;

// Re-export main types for convenience
pub use algo::{Direction, PathOptions, PathResult};
pub use config::{Config, ConfigError, DuplicateNodePolicy, EdgeValidation, GraphConfig};
pub use graph::{
    AttributeValue, Attributes, Edge, GraphError, GraphNode, GraphResult, GraphStatistics,
    GraphStore, NodeId, NodeType, RelationType, SharedGraphStore,
};
pub use persistence::{load_snapshot, save_snapshot, GraphSnapshot, SnapshotError, SnapshotFormat};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
