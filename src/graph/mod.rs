//! Core knowledge graph implementation
//!
//! This module implements the knowledge graph data model with:
//! - Nodes keyed by caller-chosen ids, with a label, an open type tag and attributes
//! - Directed, weighted edges typed by a closed set of relations
//! - Multiple edges between the same nodes
//! - In-memory storage with insertion-ordered indices

pub mod attribute;
pub mod edge;
pub mod node;
pub mod shared;
pub mod store;
pub mod types;

// Re-export main types
pub use attribute::{AttributeValue, Attributes};
pub use edge::{Edge, DEFAULT_WEIGHT};
pub use node::GraphNode;
pub use shared::SharedGraphStore;
pub use store::{GraphError, GraphResult, GraphStatistics, GraphStore};
pub use types::{NodeId, NodeType, ParseRelationTypeError, RelationType};
