//! Ordered ancestor chains fetched from the store

use super::error::QueryResult;
use crate::graph::{GraphId, NodeRef};
use crate::storage::TreeStore;

/// Nodes from nearest to most distant, ending at a tree root
///
/// Never mutated after creation; narrowing produces a new chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorChain(Vec<NodeRef>);

impl AncestorChain {
    pub fn new(nodes: Vec<NodeRef>) -> Self {
        Self(nodes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&NodeRef> {
        self.0.first()
    }

    /// The most distant node of the chain
    pub fn root(&self) -> Option<&NodeRef> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NodeRef> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[NodeRef] {
        &self.0
    }

    /// The chain from position `index` onwards
    pub fn suffix_from(&self, index: usize) -> AncestorChain {
        Self(self.0.get(index..).map(<[NodeRef]>::to_vec).unwrap_or_default())
    }
}

/// Ancestor lookups against one graph
pub struct AncestryIndex<'a, S: TreeStore + ?Sized> {
    store: &'a S,
    graph: &'a GraphId,
}

impl<'a, S: TreeStore + ?Sized> AncestryIndex<'a, S> {
    pub fn new(store: &'a S, graph: &'a GraphId) -> Self {
        Self { store, graph }
    }

    /// Strict ancestors of `node`, parent first
    pub fn chain(&self, node: &NodeRef) -> QueryResult<AncestorChain> {
        Ok(AncestorChain(self.store.ancestor_chain(self.graph, node)?))
    }

    /// `node` followed by its ancestors
    pub fn lineage(&self, node: &NodeRef) -> QueryResult<AncestorChain> {
        let mut nodes = vec![node.clone()];
        nodes.extend(self.store.ancestor_chain(self.graph, node)?);
        Ok(AncestorChain(nodes))
    }
}
