//! Errors raised by the subtree query core

use crate::graph::NodeRef;
use crate::storage::StorageError;
use thiserror::Error;

/// Errors that can occur while answering a subtree query
#[derive(Debug, Error)]
pub enum QueryError {
    /// A single taxon could not be resolved; callers drop it and continue
    #[error("Taxon not found: {0}")]
    NotFound(String),

    #[error("None of the requested taxa share a common ancestor in this tree")]
    NoCommonAncestor,

    /// The record batch never reached a fixed point with every node placed
    #[error("Incomplete tree: {pending} record(s) could not be attached under the root")]
    IncompleteTree {
        pending: usize,
        /// A few of the offending nodes, for diagnostics
        samples: Vec<NodeRef>,
    },

    #[error("No taxa requested")]
    EmptyQuery,

    #[error("No stored tree contains any of the requested taxa")]
    NoMatchingTree,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;
