//! In-memory knowledge graph storage
//!
//! Nodes live in an insertion-ordered table keyed by [`NodeId`]; edges live in
//! per-source adjacency lists. A reverse index of incoming edges supports
//! lookups by target and undirected traversal.

use super::attribute::AttributeValue;
use super::edge::{Edge, DEFAULT_WEIGHT};
use super::node::GraphNode;
use super::types::{NodeId, NodeType, RelationType};
use crate::algo::{self, Direction, PathOptions, PathResult};
use crate::config::{DuplicateNodePolicy, EdgeValidation, GraphConfig};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Invalid node: {0}")]
    InvalidNode(String),

    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Node {0} already exists")]
    NodeAlreadyExists(NodeId),

    #[error("No path from {from} to {to}")]
    PathNotFound { from: NodeId, to: NodeId },

    #[error("Invalid edge weight {0}: weights must be finite")]
    InvalidWeight(f64),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Location of an edge inside its source node's adjacency list
///
/// Edges are never removed individually, so positions stay valid until
/// [`GraphStore::clear`].
#[derive(Debug, Clone, PartialEq)]
struct EdgeSlot {
    source: NodeId,
    index: usize,
}

/// Aggregate counts over the current contents of a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// Nodes per type, in order of first appearance
    pub node_types: IndexMap<NodeType, usize>,
    /// Edges per relation, in order of first appearance
    pub relation_types: IndexMap<RelationType, usize>,
}

impl GraphStatistics {
    pub fn node_type_count(&self, node_type: &str) -> usize {
        self.node_types
            .iter()
            .find(|(ty, _)| ty.as_str() == node_type)
            .map_or(0, |(_, count)| *count)
    }

    pub fn relation_count(&self, relation: RelationType) -> usize {
        self.relation_types.get(&relation).copied().unwrap_or(0)
    }
}

impl fmt::Display for GraphStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nodes: {}, edges: {}, node_types: {{", self.node_count, self.edge_count)?;
        for (i, (ty, count)) in self.node_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", ty, count)?;
        }
        write!(f, "}}, relation_types: {{")?;
        for (i, (rel, count)) in self.relation_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", rel, count)?;
        }
        write!(f, "}}")
    }
}

/// In-memory knowledge graph storage
///
/// - nodes: NodeId -> GraphNode (insertion ordered)
/// - adjacency: NodeId -> Vec<Edge> (outgoing edges in insertion order)
/// - incoming: NodeId -> Vec<EdgeSlot> (reverse index into `adjacency`)
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// Duplicate-id and edge-validation policies
    config: GraphConfig,

    nodes: IndexMap<NodeId, GraphNode>,

    /// Outgoing edges for each node (adjacency list)
    adjacency: IndexMap<NodeId, Vec<Edge>>,

    /// Incoming edges for each node
    incoming: IndexMap<NodeId, Vec<EdgeSlot>>,

    /// Every edge in insertion order
    edge_order: Vec<EdgeSlot>,
}

impl GraphStore {
    /// Create a new empty graph store with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new empty graph store with explicit policies
    pub fn with_config(config: GraphConfig) -> Self {
        GraphStore {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Insert a node, resolving an existing id according to the configured
    /// [`DuplicateNodePolicy`]
    ///
    /// Edges are keyed independently of nodes, so replacing a node keeps every
    /// edge that starts or ends at its id.
    pub fn add_node(&mut self, node: GraphNode) -> GraphResult<()> {
        node.validate()?;

        match self.nodes.get_mut(&node.id) {
            None => {
                debug!("Added node {} ({}, {})", node.id, node.label, node.node_type);
                self.nodes.insert(node.id.clone(), node);
            }
            Some(existing) => match self.config.duplicate_nodes {
                DuplicateNodePolicy::Overwrite => {
                    warn!("Overwriting node {}", node.id);
                    *existing = node;
                }
                DuplicateNodePolicy::Reject => {
                    return Err(GraphError::NodeAlreadyExists(node.id));
                }
                DuplicateNodePolicy::Merge => {
                    debug!("Merged node {}", node.id);
                    existing.merge_from(node);
                }
            },
        }

        Ok(())
    }

    /// Add a directed edge with the default weight
    pub fn add_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        relation: RelationType,
    ) -> GraphResult<()> {
        self.add_weighted_edge(source, target, relation, DEFAULT_WEIGHT)
    }

    /// Add a directed edge with an explicit weight
    pub fn add_weighted_edge(
        &mut self,
        source: impl Into<NodeId>,
        target: impl Into<NodeId>,
        relation: RelationType,
        weight: f64,
    ) -> GraphResult<()> {
        self.insert_edge(Edge::new(source, target, relation).with_weight(weight))
    }

    /// Append an edge to its source's adjacency list
    ///
    /// Parallel edges are kept. With [`EdgeValidation::Strict`] both endpoints
    /// must already exist (the source is checked first); with
    /// [`EdgeValidation::Permissive`] a dangling edge is stored.
    pub fn insert_edge(&mut self, edge: Edge) -> GraphResult<()> {
        if !edge.weight.is_finite() {
            return Err(GraphError::InvalidWeight(edge.weight));
        }

        for endpoint in [&edge.source, &edge.target] {
            if self.nodes.contains_key(endpoint) {
                continue;
            }
            match self.config.edge_validation {
                EdgeValidation::Strict => return Err(GraphError::UnknownNode(endpoint.clone())),
                EdgeValidation::Permissive => warn!(
                    "Storing edge {} -[{}]-> {} with missing endpoint {}",
                    edge.source, edge.relation, edge.target, endpoint
                ),
            }
        }

        debug!("Added edge {} -[{}]-> {}", edge.source, edge.relation, edge.target);
        self.push_edge(edge);
        Ok(())
    }

    /// Store an edge without endpoint checks
    pub(crate) fn push_edge(&mut self, edge: Edge) {
        let edges = self.adjacency.entry(edge.source.clone()).or_default();
        let slot = EdgeSlot {
            source: edge.source.clone(),
            index: edges.len(),
        };
        edges.push(edge);
        self.incoming
            .entry(edges[slot.index].target.clone())
            .or_default()
            .push(slot.clone());
        self.edge_order.push(slot);
    }

    /// Store a validated node, replacing any node with the same id
    pub(crate) fn restore_node(&mut self, node: GraphNode) -> GraphResult<()> {
        node.validate()?;
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Get a node by ID
    pub fn get_node(&self, id: impl AsRef<str>) -> GraphResult<&GraphNode> {
        let id = id.as_ref();
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::new(id)))
    }

    /// Check if a node exists
    pub fn has_node(&self, id: impl AsRef<str>) -> bool {
        self.nodes.contains_key(id.as_ref())
    }

    /// Set one attribute on a stored node, returning the previous value
    pub fn set_node_attribute(
        &mut self,
        id: impl AsRef<str>,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> GraphResult<Option<AttributeValue>> {
        let id = id.as_ref();
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| GraphError::NodeNotFound(NodeId::new(id)))?;
        Ok(node.set_attribute(key, value))
    }

    /// Outgoing edges of a node, optionally restricted to one relation
    ///
    /// Unknown ids and nodes without edges both yield an empty list.
    pub fn get_edges(&self, id: impl AsRef<str>, relation: Option<RelationType>) -> Vec<&Edge> {
        self.outgoing(id.as_ref())
            .iter()
            .filter(|edge| edge.matches(relation))
            .collect()
    }

    /// Edges pointing at a node, in insertion order
    pub fn get_incoming_edges(&self, id: impl AsRef<str>, relation: Option<RelationType>) -> Vec<&Edge> {
        self.incoming_iter(id.as_ref())
            .filter(|edge| edge.matches(relation))
            .collect()
    }

    pub(crate) fn outgoing(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn incoming_iter<'a>(&'a self, id: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.incoming
            .get(id)
            .into_iter()
            .flatten()
            .filter_map(move |slot| self.edge_at(slot))
    }

    fn edge_at(&self, slot: &EdgeSlot) -> Option<&Edge> {
        self.adjacency.get(&slot.source)?.get(slot.index)
    }

    /// All edges in the order they were added
    pub fn edges_in_insertion_order(&self) -> impl Iterator<Item = &Edge> {
        self.edge_order.iter().filter_map(move |slot| self.edge_at(slot))
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    /// All edges, grouped by source
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.adjacency.values().flatten()
    }

    /// Get all nodes with a specific type
    pub fn nodes_by_type(&self, node_type: &NodeType) -> Vec<&GraphNode> {
        self.nodes.values().filter(|n| n.is_type(node_type)).collect()
    }

    /// Nodes whose label matches `label`, ignoring case
    pub fn find_by_label(&self, label: &str) -> Vec<&GraphNode> {
        let wanted = label.to_lowercase();
        self.nodes
            .values()
            .filter(|n| n.label.to_lowercase() == wanted)
            .collect()
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edge_order.is_empty()
    }

    /// Recompute aggregate statistics from the current contents
    pub fn get_stats(&self) -> GraphStatistics {
        let mut node_types: IndexMap<NodeType, usize> = IndexMap::new();
        for node in self.nodes.values() {
            *node_types.entry(node.node_type.clone()).or_insert(0) += 1;
        }

        let mut edge_count = 0;
        let mut relation_types: IndexMap<RelationType, usize> = IndexMap::new();
        for edge in self.edges_in_insertion_order() {
            edge_count += 1;
            *relation_types.entry(edge.relation).or_insert(0) += 1;
        }

        GraphStatistics {
            node_count: self.nodes.len(),
            edge_count,
            node_types,
            relation_types,
        }
    }

    /// Shortest hop path between two nodes, following relations either way
    ///
    /// At each node outgoing edges are tried before incoming ones, each in
    /// insertion order. `max_depth` bounds the number of hops.
    ///
    /// A single `A -> B` edge therefore yields a path from `B` to `A` as well.
    /// Callers that need "no directed path means `PathNotFound`" should use
    /// [`GraphStore::find_directed_path`].
    pub fn find_path(
        &self,
        source: impl AsRef<str>,
        target: impl AsRef<str>,
        max_depth: Option<usize>,
    ) -> GraphResult<Vec<NodeId>> {
        let options = PathOptions {
            max_depth,
            ..PathOptions::default()
        };
        self.find_path_with(source, target, &options).map(|result| result.path)
    }

    /// Shortest hop path following outgoing edges only
    pub fn find_directed_path(
        &self,
        source: impl AsRef<str>,
        target: impl AsRef<str>,
        max_depth: Option<usize>,
    ) -> GraphResult<Vec<NodeId>> {
        let options = PathOptions {
            max_depth,
            direction: Direction::Outgoing,
            relation: None,
        };
        self.find_path_with(source, target, &options).map(|result| result.path)
    }

    /// Breadth-first path search with explicit options
    pub fn find_path_with(
        &self,
        source: impl AsRef<str>,
        target: impl AsRef<str>,
        options: &PathOptions,
    ) -> GraphResult<PathResult> {
        algo::shortest_path(self, source.as_ref(), target.as_ref(), options)
    }

    /// Lowest total weight path with explicit options
    pub fn find_weighted_path(
        &self,
        source: impl AsRef<str>,
        target: impl AsRef<str>,
        options: &PathOptions,
    ) -> GraphResult<PathResult> {
        algo::weighted_shortest_path(self, source.as_ref(), target.as_ref(), options)
    }

    /// Clear all data
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.adjacency.clear();
        self.incoming.clear();
        self.edge_order.clear();
    }
}
