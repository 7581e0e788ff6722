//! Edge implementation for the knowledge graph
//!
//! Edges are directed, typed and weighted. Several edges may join the same
//! pair of nodes, with the same or different relation types.

use super::types::{NodeId, RelationType};
use serde::{Deserialize, Serialize};

/// Weight given to edges added without an explicit one
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A directed relationship between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Kind of relationship
    pub relation: RelationType,

    /// Strength or confidence of the relationship
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

impl Edge {
    /// Create a new directed edge with the default weight
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, relation: RelationType) -> Self {
        Edge {
            source: source.into(),
            target: target.into(),
            relation,
            weight: DEFAULT_WEIGHT,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// True when `relation` is `None` or equal to this edge's relation
    pub fn matches(&self, relation: Option<RelationType>) -> bool {
        relation.map_or(true, |rel| self.relation == rel)
    }
}
