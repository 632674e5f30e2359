//! Identifiers for graphs and the nodes stored in them

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a node in the backing graph
///
/// Opaque to the query core: two refs are equal when their strings are.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeRef(String);

impl NodeRef {
    /// Create a NodeRef from an existing identifier string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Mint a fresh node ref underneath a graph
    pub fn mint(graph: &GraphId) -> Self {
        Self(format!("{}node/{}", graph.as_str(), Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of a named graph holding one tree (or one taxonomy)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GraphId(String);

impl GraphId {
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Taxonomy graphs are conventionally named with a `_taxonomy` marker
    pub fn is_taxonomy(&self) -> bool {
        self.0.contains("_taxonomy")
    }
}

impl std::fmt::Display for GraphId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GraphId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for GraphId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
