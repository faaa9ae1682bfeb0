//! Node tree - the explicit scope of one scan.
//!
//! Callers pass the forest to audit explicitly; the engine never reaches
//! into ambient host state. Parent links must form a forest (no cycles)
//! for ancestry walks to terminate.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{AuditError, AuditResult};
use crate::node::{NodeId, Rgb, VisualNode};

/// An ordered forest of visual nodes, indexed by ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeTree {
    /// All nodes in the scope, indexed by ID.
    nodes: HashMap<NodeId, VisualNode>,
    /// Top-level node IDs in document order.
    roots: Vec<NodeId>,
}

impl NodeTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node into the tree.
    ///
    /// Nodes without a parent become roots, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::DuplicateNode`] if a node with the same ID is
    /// already present.
    pub fn insert(&mut self, node: VisualNode) -> AuditResult<NodeId> {
        if self.nodes.contains_key(&node.id) {
            return Err(AuditError::DuplicateNode(node.id.to_string()));
        }
        let id = node.id.clone();
        if node.parent.is_none() {
            self.roots.push(id.clone());
        }
        self.nodes.insert(id.clone(), node);
        Ok(id)
    }

    /// Get a node by ID.
    #[must_use]
    pub fn get(&self, id: &NodeId) -> Option<&VisualNode> {
        self.nodes.get(id)
    }

    /// Get a node by ID, erroring when absent.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::NodeNotFound`] if the ID is not in the tree.
    pub fn require(&self, id: &NodeId) -> AuditResult<&VisualNode> {
        self.nodes
            .get(id)
            .ok_or_else(|| AuditError::NodeNotFound(id.to_string()))
    }

    /// Top-level nodes in document order.
    pub fn roots(&self) -> impl Iterator<Item = &VisualNode> {
        self.roots.iter().filter_map(|id| self.nodes.get(id))
    }

    /// Number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order depth-first traversal of the whole forest.
    ///
    /// Visits each node before its children, children left to right before
    /// subsequent siblings. Dangling child IDs are skipped.
    #[must_use]
    pub fn walk(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: self.roots.iter().rev().collect(),
        }
    }

    /// Ancestors of a node, nearest first.
    ///
    /// Terminates at the first missing parent link.
    #[must_use]
    pub fn ancestors<'a>(&'a self, node: &'a VisualNode) -> Ancestors<'a> {
        Ancestors {
            tree: self,
            next: node.parent.as_ref(),
        }
    }

    /// Background color behind a node: the first solid fill found walking
    /// the ancestor chain, defaulting to opaque white.
    ///
    /// This deep walk backs the contrast rule; snapshot extraction uses a
    /// separate one-level parent lookup.
    #[must_use]
    pub fn background_of(&self, node: &VisualNode) -> Rgb {
        self.ancestors(node)
            .find_map(VisualNode::solid_fill)
            .unwrap_or(Rgb::WHITE)
    }

    /// Serialize the tree to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> AuditResult<String> {
        serde_json::to_string(self).map_err(AuditError::Serialization)
    }

    /// Deserialize a tree from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> AuditResult<Self> {
        serde_json::from_str(json).map_err(AuditError::Serialization)
    }
}

/// Iterator over a tree in pre-order.
#[derive(Debug)]
pub struct Preorder<'a> {
    tree: &'a NodeTree,
    stack: Vec<&'a NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a VisualNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let id = self.stack.pop()?;
            if let Some(node) = self.tree.nodes.get(id) {
                for child in node.children().iter().rev() {
                    self.stack.push(child);
                }
                return Some(node);
            }
        }
    }
}

/// Iterator over a node's ancestor chain, nearest first.
#[derive(Debug)]
pub struct Ancestors<'a> {
    tree: &'a NodeTree,
    next: Option<&'a NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a VisualNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next.take()?;
        let node = self.tree.nodes.get(id)?;
        self.next = node.parent.as_ref();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKind, Paint};

    fn frame(id: &str, children: &[&str]) -> VisualNode {
        VisualNode::new(
            id,
            format!("Frame {id}"),
            NodeKind::Frame {
                children: children.iter().map(|c| NodeId::from(*c)).collect(),
            },
        )
    }

    fn leaf(id: &str, parent: &str) -> VisualNode {
        VisualNode::new(id, format!("Leaf {id}"), NodeKind::Rectangle).with_parent(parent)
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut tree = NodeTree::new();
        assert!(tree.is_empty());

        let id = tree.insert(frame("1:0", &[])).expect("should insert");
        assert_eq!(tree.len(), 1);
        assert!(tree.get(&id).is_some());
        assert!(tree.require(&id).is_ok());
        assert!(tree.require(&NodeId::from("9:9")).is_err());
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut tree = NodeTree::new();
        tree.insert(frame("1:0", &[])).expect("should insert");

        let result = tree.insert(frame("1:0", &[]));
        assert!(matches!(result, Err(AuditError::DuplicateNode(_))));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_walk_is_preorder() {
        let mut tree = NodeTree::new();
        tree.insert(frame("r", &["a", "b"])).expect("insert");
        tree.insert(frame("a", &["a1"]).with_parent("r"))
            .expect("insert");
        tree.insert(leaf("a1", "a")).expect("insert");
        tree.insert(leaf("b", "r")).expect("insert");

        let order: Vec<_> = tree.walk().map(|n| n.id.as_str().to_string()).collect();
        assert_eq!(order, ["r", "a", "a1", "b"]);
        assert_eq!(order.len(), tree.len());
    }

    #[test]
    fn test_walk_skips_dangling_children() {
        let mut tree = NodeTree::new();
        tree.insert(frame("r", &["missing", "b"])).expect("insert");
        tree.insert(leaf("b", "r")).expect("insert");

        let order: Vec<_> = tree.walk().map(|n| n.id.as_str().to_string()).collect();
        assert_eq!(order, ["r", "b"]);
    }

    #[test]
    fn test_ancestors_nearest_first() {
        let mut tree = NodeTree::new();
        tree.insert(frame("top", &["mid"])).expect("insert");
        tree.insert(frame("mid", &["leaf"]).with_parent("top"))
            .expect("insert");
        tree.insert(leaf("leaf", "mid")).expect("insert");

        let leaf_node = tree.get(&NodeId::from("leaf")).expect("present");
        let chain: Vec<_> = tree
            .ancestors(leaf_node)
            .map(|n| n.id.as_str().to_string())
            .collect();
        assert_eq!(chain, ["mid", "top"]);
    }

    #[test]
    fn test_background_of_walks_whole_chain() {
        let mut tree = NodeTree::new();
        let top = frame("top", &["mid"]).with_fill(Paint::Solid {
            color: Rgb::new(30, 30, 30),
        });
        tree.insert(top).expect("insert");
        tree.insert(frame("mid", &["leaf"]).with_parent("top"))
            .expect("insert");
        tree.insert(leaf("leaf", "mid")).expect("insert");

        let leaf_node = tree.get(&NodeId::from("leaf")).expect("present");
        // mid has no fill, so the grandparent's fill wins
        assert_eq!(tree.background_of(leaf_node), Rgb::new(30, 30, 30));
    }

    #[test]
    fn test_background_of_defaults_to_white() {
        let mut tree = NodeTree::new();
        tree.insert(frame("top", &["leaf"])).expect("insert");
        tree.insert(leaf("leaf", "top")).expect("insert");

        let leaf_node = tree.get(&NodeId::from("leaf")).expect("present");
        assert_eq!(tree.background_of(leaf_node), Rgb::WHITE);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut tree = NodeTree::new();
        tree.insert(frame("r", &["b"])).expect("insert");
        tree.insert(leaf("b", "r")).expect("insert");

        let json = tree.to_json().expect("should serialize");
        let parsed = NodeTree::from_json(&json).expect("should deserialize");
        assert_eq!(parsed.len(), 2);

        let order: Vec<_> = parsed.walk().map(|n| n.id.as_str().to_string()).collect();
        assert_eq!(order, ["r", "b"]);
    }
}
