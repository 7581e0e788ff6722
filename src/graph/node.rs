//! Node implementation for the knowledge graph

use super::attribute::{AttributeValue, Attributes};
use super::store::{GraphError, GraphResult};
use super::types::{NodeId, NodeType};
use serde::{Deserialize, Serialize};

/// A vertex in the knowledge graph
///
/// Nodes have:
/// - A caller-chosen unique ID (the store's primary key)
/// - A human-readable label (e.g. "dog")
/// - A node type tag used for filtering and display
/// - Free-form attributes
///
/// Equality compares every field, so a node read back from the store is
/// equal to the one inserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Human-readable name
    pub label: String,

    /// Classification tag, never used for identity
    #[serde(default)]
    pub node_type: NodeType,

    /// Auxiliary metadata, not interpreted by the store
    #[serde(default)]
    pub attributes: Attributes,
}

impl GraphNode {
    /// Create a new node of the default type (`entity`)
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>) -> Self {
        GraphNode {
            id: id.into(),
            label: label.into(),
            node_type: NodeType::default(),
            attributes: Attributes::new(),
        }
    }

    /// Set the node type
    pub fn with_type(mut self, node_type: impl Into<NodeType>) -> Self {
        self.node_type = node_type.into();
        self
    }

    /// Add one attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Replace all attributes
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Set an attribute value, returning the previous one
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Option<AttributeValue> {
        self.attributes.insert(key.into(), value.into())
    }

    /// Get an attribute value
    pub fn get_attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Remove an attribute, keeping the order of the others
    pub fn remove_attribute(&mut self, key: &str) -> Option<AttributeValue> {
        self.attributes.shift_remove(key)
    }

    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_type(&self, node_type: &NodeType) -> bool {
        &self.node_type == node_type
    }

    /// Check the node can be stored: id and label must be non-empty
    pub fn validate(&self) -> GraphResult<()> {
        if self.id.is_blank() {
            return Err(GraphError::InvalidNode("node id must not be empty".to_string()));
        }
        if self.label.trim().is_empty() {
            return Err(GraphError::InvalidNode(format!("node {} has an empty label", self.id)));
        }
        Ok(())
    }

    /// Fold a newer version of this node into `self`
    ///
    /// Label and type come from `newer`; attributes are merged key by key with
    /// `newer` winning on conflicts.
    pub(crate) fn merge_from(&mut self, newer: GraphNode) {
        self.label = newer.label;
        self.node_type = newer.node_type;
        self.attributes.extend(newer.attributes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_node() {
        let node = GraphNode::new("uid_dog", "dog");
        assert_eq!(node.id, NodeId::new("uid_dog"));
        assert_eq!(node.label, "dog");
        assert!(node.is_type(&NodeType::entity()));
        assert_eq!(node.attribute_count(), 0);
    }

    #[test]
    fn test_builder() {
        let node = GraphNode::new(2u64, "animal")
            .with_type("concept")
            .with_attribute("source", "wordnet")
            .with_attribute("frequency", 1200i64);

        assert_eq!(node.id.as_str(), "2");
        assert_eq!(node.node_type, NodeType::concept());
        assert_eq!(node.get_attribute("source").unwrap().as_string(), Some("wordnet"));
        assert_eq!(node.get_attribute("frequency").unwrap().as_integer(), Some(1200));
    }

    #[test]
    fn test_attributes() {
        let mut node = GraphNode::new("uid_cat", "cat");

        assert!(node.set_attribute("legs", 4i64).is_none());
        assert_eq!(node.set_attribute("legs", 3i64), Some(AttributeValue::Integer(4)));
        node.set_attribute("domestic", true);
        assert_eq!(node.attribute_count(), 2);

        let removed = node.remove_attribute("legs");
        assert_eq!(removed, Some(AttributeValue::Integer(3)));
        assert!(!node.has_attribute("legs"));
        assert!(node.has_attribute("domestic"));
    }

    #[test]
    fn test_validate() {
        assert!(GraphNode::new("a", "apple").validate().is_ok());
        assert!(matches!(
            GraphNode::new("", "apple").validate(),
            Err(GraphError::InvalidNode(_))
        ));
        assert!(matches!(
            GraphNode::new("a", " ").validate(),
            Err(GraphError::InvalidNode(_))
        ));
    }

    #[test]
    fn test_merge_from() {
        let mut node = GraphNode::new("x", "old")
            .with_attribute("keep", 1i64)
            .with_attribute("shared", "old");
        let newer = GraphNode::new("x", "new")
            .with_type("concept")
            .with_attribute("shared", "new")
            .with_attribute("added", true);

        node.merge_from(newer);

        assert_eq!(node.label, "new");
        assert_eq!(node.node_type, NodeType::concept());
        assert_eq!(node.get_attribute("keep"), Some(&AttributeValue::Integer(1)));
        assert_eq!(node.get_attribute("shared").unwrap().as_string(), Some("new"));
        assert_eq!(node.get_attribute("added").unwrap().as_boolean(), Some(true));
    }

    #[test]
    fn test_node_equality_is_structural() {
        let a = GraphNode::new("n", "label");
        let b = GraphNode::new("n", "label");
        let c = GraphNode::new("n", "other");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
