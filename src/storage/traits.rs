//! Storage trait definitions

use crate::graph::{EdgeRecord, GraphId, NodeRef};
use chrono::{DateTime, Utc};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Graph not found: {0}")]
    GraphNotFound(String),

    #[error("Graph already exists: {0}")]
    DuplicateGraph(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Date parsing error: {0}")]
    DateParse(String),

    #[error("Store connection lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A taxonomy node whose alternate label matched a lookup
#[derive(Debug, Clone, PartialEq)]
pub struct SynonymMatch {
    /// Node in the taxonomy graph
    pub node: NodeRef,
    /// The label the taxonomy node carries as its primary name
    pub canonical_label: String,
}

/// Summary row for a stored graph
#[derive(Debug, Clone)]
pub struct GraphSummary {
    pub graph: GraphId,
    /// Number of labeled nodes
    pub taxa: usize,
    pub loaded_at: DateTime<Utc>,
}

/// A graph ranked by how many requested taxa it contains
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphMatch {
    pub graph: GraphId,
    pub matches: usize,
}

/// Trait for tree storage backends
///
/// The first four methods are the read boundary the query core depends
/// on; the rest manage the stored graphs. Implementations must be
/// thread-safe (Send + Sync) so independent queries can share a store.
pub trait TreeStore: Send + Sync {
    // === Query boundary ===

    /// Exact label match within a named graph
    fn resolve_name(&self, graph: &GraphId, label: &str) -> StorageResult<Option<NodeRef>>;

    /// Find a taxonomy node carrying `label` as an alternate name
    fn resolve_synonym(&self, taxonomy: &GraphId, label: &str) -> StorageResult<Option<SynonymMatch>>;

    /// Ancestors of `node`, nearest first; empty for a root or unknown node
    fn ancestor_chain(&self, graph: &GraphId, node: &NodeRef) -> StorageResult<Vec<NodeRef>>;

    /// All rows of the subtree rooted at `anchor`, or of the whole graph
    fn subtree_rows(&self, graph: &GraphId, anchor: Option<&NodeRef>) -> StorageResult<Vec<EdgeRecord>>;

    // === Graph management ===

    /// Persist a tree under a new graph id, returning the number of nodes stored
    fn add_tree(&self, graph: &GraphId, records: &[EdgeRecord]) -> StorageResult<usize>;

    /// Attach `(canonical, synonym)` label pairs to taxonomy nodes
    fn add_synonyms(&self, taxonomy: &GraphId, pairs: &[(String, String)]) -> StorageResult<usize>;

    /// Delete a graph and everything in it
    fn remove_graph(&self, graph: &GraphId) -> StorageResult<bool>;

    fn graph_exists(&self, graph: &GraphId) -> StorageResult<bool>;

    fn list_graphs(&self) -> StorageResult<Vec<GraphSummary>>;

    /// Graphs containing any of `labels`, best match first
    fn graphs_containing(&self, labels: &[String], taxonomy: Option<&GraphId>) -> StorageResult<Vec<GraphMatch>>;

    /// Sorted distinct labels of one graph, or of every graph
    fn names(&self, graph: Option<&GraphId>) -> StorageResult<Vec<String>>;
}

/// Extension trait for opening stores from paths
pub trait OpenStore: TreeStore + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
