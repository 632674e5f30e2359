//! Storage backends for the tree store
//!
//! The query core talks to storage only through the `TreeStore` trait.
//! The bundled implementation is `SqliteStore`, which answers ancestor
//! and subtree lookups with recursive queries.

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::{
    GraphMatch, GraphSummary, OpenStore, StorageError, StorageResult, SynonymMatch, TreeStore,
};
