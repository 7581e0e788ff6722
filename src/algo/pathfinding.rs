//! Shortest-path queries over the knowledge graph
//!
//! BFS for fewest hops, Dijkstra for lowest total edge weight. Both validate
//! endpoints against the store before searching.

use super::{build_view, PathOptions};
use crate::graph::{GraphError, GraphResult, GraphStore, NodeId};
use santok_graph_algorithms::{bfs, dijkstra, GraphView};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of a pathfinding query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    /// Node ids from source to target, both inclusive
    pub path: Vec<NodeId>,
    /// Hop count for BFS, summed edge weight for Dijkstra
    pub cost: f64,
}

impl PathResult {
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

type Algorithm = fn(&GraphView, usize, usize, Option<usize>) -> Option<santok_graph_algorithms::PathResult>;

/// Breadth-First Search (Unweighted Shortest Path)
pub fn shortest_path(
    store: &GraphStore,
    source: &str,
    target: &str,
    options: &PathOptions,
) -> GraphResult<PathResult> {
    search(store, source, target, options, bfs)
}

/// Dijkstra's Algorithm (Weighted Shortest Path)
///
/// Edge weights are costs; negative weights are never traversed.
pub fn weighted_shortest_path(
    store: &GraphStore,
    source: &str,
    target: &str,
    options: &PathOptions,
) -> GraphResult<PathResult> {
    search(store, source, target, options, dijkstra)
}

fn search(
    store: &GraphStore,
    source: &str,
    target: &str,
    options: &PathOptions,
    algorithm: Algorithm,
) -> GraphResult<PathResult> {
    for endpoint in [source, target] {
        if !store.has_node(endpoint) {
            return Err(GraphError::UnknownNode(NodeId::new(endpoint)));
        }
    }

    let (source_id, target_id) = (NodeId::new(source), NodeId::new(target));

    if source == target {
        return Ok(PathResult {
            path: vec![source_id.clone()],
            source: source_id,
            target: target_id,
            cost: 0.0,
        });
    }

    debug!("Searching path {} -> {} with {:?}", source, target, options);

    let topology = build_view(store, options.direction, options.relation);
    let not_found = || GraphError::PathNotFound {
        from: source_id.clone(),
        to: target_id.clone(),
    };

    let (Some(s_idx), Some(t_idx)) = (topology.index_of(source), topology.index_of(target)) else {
        return Err(not_found());
    };

    let found = algorithm(&topology.view, s_idx, t_idx, options.max_depth).ok_or_else(not_found)?;

    Ok(PathResult {
        path: found
            .path
            .into_iter()
            .map(|idx| topology.node_at(idx).clone())
            .collect(),
        cost: found.cost,
        source: source_id,
        target: target_id,
    })
}
