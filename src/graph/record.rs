//! Row-level description of a tree node as returned by the store

use super::node::NodeRef;
use serde::{Deserialize, Serialize};

/// One row of a subtree result batch
///
/// Batches are unordered and a record may name a parent whose own record
/// appears later in the batch, or not at all when the parent lies outside
/// the anchored subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// The node this row describes
    pub node: NodeRef,
    /// Length of the edge leading into `node`
    pub branch_length: Option<f64>,
    /// Parent node, absent for a tree root
    pub parent: Option<NodeRef>,
    /// Taxon label carried by the node
    pub label: Option<String>,
}

impl EdgeRecord {
    /// Create a parentless, unlabeled record
    pub fn new(node: impl Into<NodeRef>) -> Self {
        Self {
            node: node.into(),
            branch_length: None,
            parent: None,
            label: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<NodeRef>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_branch_length(mut self, length: f64) -> Self {
        self.branch_length = Some(length);
        self
    }

    /// True when the record has no parent and therefore roots a whole tree
    pub fn is_parentless(&self) -> bool {
        self.parent.is_none()
    }
}
