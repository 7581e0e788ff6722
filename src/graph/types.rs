//! Core type definitions for the knowledge graph

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Caller-supplied unique identifier for a node
///
/// Ids are opaque strings; integer ids are stored in their decimal form so
/// `NodeId::from(7u64)` and `NodeId::from("7")` name the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        NodeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for ids that cannot key a node (empty or whitespace only)
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        NodeId(s)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        NodeId(s.to_string())
    }
}

impl From<&NodeId> for NodeId {
    fn from(id: &NodeId) -> Self {
        id.clone()
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        NodeId(id.to_string())
    }
}

impl From<u32> for NodeId {
    fn from(id: u32) -> Self {
        NodeId(id.to_string())
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId(id.to_string())
    }
}

impl From<i32> for NodeId {
    fn from(id: i32) -> Self {
        NodeId(id.to_string())
    }
}

/// Classification tag for a node (e.g., "entity", "concept")
///
/// An open set: any string is a valid node type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NodeType(String);

impl NodeType {
    pub fn new(node_type: impl Into<String>) -> Self {
        NodeType(node_type.into())
    }

    pub fn entity() -> Self {
        NodeType::new("entity")
    }

    pub fn concept() -> Self {
        NodeType::new("concept")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NodeType {
    fn default() -> Self {
        NodeType::entity()
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for NodeType {
    fn from(s: String) -> Self {
        NodeType(s)
    }
}

impl From<&str> for NodeType {
    fn from(s: &str) -> Self {
        NodeType(s.to_string())
    }
}

/// Kind of relationship an edge carries
///
/// A closed set. Relations are directional: `dog IS_A animal` says nothing
/// about `animal IS_A dog`, and the store never adds inverse edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    /// Subsumption: the source is a kind of the target
    IsA,
    /// The source is a component of the target
    PartOf,
    /// The target is a component of the source
    HasPart,
    /// The target describes a property of the source
    HasProperty,
    /// Unspecified association
    RelatedTo,
    /// The source brings about the target
    Causes,
    /// The source is used for the target
    UsedFor,
    /// The source is able to do the target
    CapableOf,
    /// The source is located in the target
    LocatedIn,
    SimilarTo,
    OppositeOf,
    /// The source is a specific instance of the target
    InstanceOf,
    /// The source originates from the target
    DerivedFrom,
}

impl RelationType {
    /// Every variant, in declaration order
    pub const ALL: [RelationType; 13] = [
        RelationType::IsA,
        RelationType::PartOf,
        RelationType::HasPart,
        RelationType::HasProperty,
        RelationType::RelatedTo,
        RelationType::Causes,
        RelationType::UsedFor,
        RelationType::CapableOf,
        RelationType::LocatedIn,
        RelationType::SimilarTo,
        RelationType::OppositeOf,
        RelationType::InstanceOf,
        RelationType::DerivedFrom,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::IsA => "IS_A",
            RelationType::PartOf => "PART_OF",
            RelationType::HasPart => "HAS_PART",
            RelationType::HasProperty => "HAS_PROPERTY",
            RelationType::RelatedTo => "RELATED_TO",
            RelationType::Causes => "CAUSES",
            RelationType::UsedFor => "USED_FOR",
            RelationType::CapableOf => "CAPABLE_OF",
            RelationType::LocatedIn => "LOCATED_IN",
            RelationType::SimilarTo => "SIMILAR_TO",
            RelationType::OppositeOf => "OPPOSITE_OF",
            RelationType::InstanceOf => "INSTANCE_OF",
            RelationType::DerivedFrom => "DERIVED_FROM",
        }
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no [`RelationType`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown relation type: {0}")]
pub struct ParseRelationTypeError(pub String);

impl FromStr for RelationType {
    type Err = ParseRelationTypeError;

    /// Case-insensitive; `_`, `-` and spaces are interchangeable separators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_uppercase(),
            })
            .collect();

        RelationType::ALL
            .iter()
            .copied()
            .find(|rel| rel.as_str() == normalized)
            .ok_or_else(|| ParseRelationTypeError(s.to_string()))
    }
}
