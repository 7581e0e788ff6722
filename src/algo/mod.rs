//! Graph algorithms module
//!
//! Algorithms are implemented in the `santok-graph-algorithms` crate over a
//! dense [`GraphView`]. This module provides the integration/adapter layer:
//! it projects a [`GraphStore`] onto a view (choosing direction and relation)
//! and maps results back to node ids.

pub mod pathfinding;

use crate::graph::{GraphStore, NodeId, RelationType};
use santok_graph_algorithms::GraphView;
use std::collections::HashMap;

pub use pathfinding::{shortest_path, weighted_shortest_path, PathResult};

/// Which edges a traversal may follow from a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// From source to target only
    Outgoing,
    /// From target back to source only
    Incoming,
    /// Either way; outgoing edges are explored first
    #[default]
    Both,
}

impl Direction {
    fn follows_outgoing(self) -> bool {
        matches!(self, Direction::Outgoing | Direction::Both)
    }

    fn follows_incoming(self) -> bool {
        matches!(self, Direction::Incoming | Direction::Both)
    }
}

/// Options shared by the path searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PathOptions {
    /// Maximum number of hops in the returned path
    pub max_depth: Option<usize>,
    pub direction: Direction,
    /// Only traverse edges of this relation
    pub relation: Option<RelationType>,
}

impl PathOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_relation(mut self, relation: RelationType) -> Self {
        self.relation = Some(relation);
        self
    }
}

/// A [`GraphView`] together with the mapping between node ids and view indices
pub struct TopologyView<'a> {
    pub view: GraphView,
    index_to_node: Vec<&'a NodeId>,
    node_to_index: HashMap<&'a str, usize>,
}

impl<'a> TopologyView<'a> {
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.node_to_index.get(id).copied()
    }

    pub fn node_at(&self, idx: usize) -> &'a NodeId {
        self.index_to_node[idx]
    }
}

/// Build a view from the store for algorithm execution
///
/// Every node becomes an index in insertion order. A node's successors are its
/// outgoing edge targets (in edge insertion order) followed, for
/// [`Direction::Both`], by its incoming edge sources. Edges whose other end is
/// not a stored node are left out.
pub fn build_view(
    store: &GraphStore,
    direction: Direction,
    relation: Option<RelationType>,
) -> TopologyView<'_> {
    // 1. Build index mappings
    let index_to_node: Vec<&NodeId> = store.nodes().map(|n| &n.id).collect();
    let node_to_index: HashMap<&str, usize> = index_to_node
        .iter()
        .enumerate()
        .map(|(idx, id)| (id.as_str(), idx))
        .collect();

    let node_count = index_to_node.len();

    // 2. Build adjacency lists
    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); node_count];
    let mut weights: Vec<Vec<f64>> = vec![Vec::new(); node_count];

    for (u_idx, &u_id) in index_to_node.iter().enumerate() {
        let mut neighbors: Vec<(&NodeId, f64)> = Vec::new();

        if direction.follows_outgoing() {
            neighbors.extend(
                store
                    .outgoing(u_id.as_str())
                    .iter()
                    .filter(|edge| edge.matches(relation))
                    .map(|edge| (&edge.target, edge.weight)),
            );
        }
        if direction.follows_incoming() {
            neighbors.extend(
                store
                    .incoming_iter(u_id.as_str())
                    .filter(|edge| edge.matches(relation))
                    .map(|edge| (&edge.source, edge.weight)),
            );
        }

        for (neighbor, weight) in neighbors {
            if let Some(&v_idx) = node_to_index.get(neighbor.as_str()) {
                outgoing[u_idx].push(v_idx);
                weights[u_idx].push(weight);
            }
        }
    }

    // 3. Convert to CSR
    TopologyView {
        view: GraphView::from_adjacency_list(outgoing, Some(weights)),
        index_to_node,
        node_to_index,
    }
}
