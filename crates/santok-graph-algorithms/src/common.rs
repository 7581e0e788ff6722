//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of the graph topology for algorithm execution.
//! Nodes are addressed by index `0..node_count`; callers keep their own mapping
//! between indices and application-level identifiers.

/// A dense, integer-indexed view of the graph topology using Compressed Sparse Row (CSR) format.
///
/// The order of successors within a node's row is significant: traversals
/// explore them left to right, so it decides which of several equally short
/// paths is returned.
#[derive(Debug, Clone, Default)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,

    /// Offsets into `out_targets`. Size = node_count + 1
    pub out_offsets: Vec<usize>,
    /// Contiguous array of target node indices
    pub out_targets: Vec<usize>,

    /// Edge weights: aligned with `out_targets`
    pub weights: Option<Vec<f64>>,
}

impl GraphView {
    /// Build a view from per-node successor lists.
    ///
    /// When `weights` is given it must mirror the shape of `outgoing`.
    pub fn from_adjacency_list(outgoing: Vec<Vec<usize>>, weights: Option<Vec<Vec<f64>>>) -> Self {
        let node_count = outgoing.len();
        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut flat_weights = weights.as_ref().map(|_| Vec::new());

        out_offsets.push(0);
        for (i, neighbors) in outgoing.into_iter().enumerate() {
            out_targets.extend(neighbors);
            out_offsets.push(out_targets.len());

            if let Some(ref mut w_flat) = flat_weights {
                if let Some(w_row) = weights.as_ref().and_then(|w| w.get(i)) {
                    w_flat.extend(w_row.iter());
                }
            }
        }

        GraphView {
            node_count,
            out_offsets,
            out_targets,
            weights: flat_weights,
        }
    }

    /// Get the out-degree of a node (by index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// Get outgoing neighbors (successors) of a node
    pub fn successors(&self, idx: usize) -> &[usize] {
        let start = self.out_offsets[idx];
        let end = self.out_offsets[idx + 1];
        &self.out_targets[start..end]
    }

    /// Get weights for outgoing edges of a node
    pub fn weights(&self, idx: usize) -> Option<&[f64]> {
        self.weights.as_ref().map(|w| {
            let start = self.out_offsets[idx];
            let end = self.out_offsets[idx + 1];
            &w[start..end]
        })
    }

    /// Total number of edges in the view
    pub fn edge_count(&self) -> usize {
        self.out_targets.len()
    }

    pub fn contains(&self, idx: usize) -> bool {
        idx < self.node_count
    }
}
