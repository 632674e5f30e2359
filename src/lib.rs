//! Treestore: minimal phylogenetic subtree retrieval
//!
//! Stores rooted trees as parent/child edge rows and answers queries of
//! the form "the smallest tree containing these taxa" against them.
//!
//! # Core Concepts
//!
//! - **Graphs**: one stored tree (or taxonomy) per graph URI
//! - **MRCA**: the nearest node whose subtree contains every requested taxon
//! - **Pruning**: removing unrequested leaves and collapsing unary nodes
//!
//! # Example
//!
//! ```
//! use treestore::{EdgeRecord, GraphId, OpenStore, SqliteStore, SubtreeQuery, TreeStore};
//!
//! let store = SqliteStore::open_in_memory().unwrap();
//! let graph = GraphId::from("http://example.org/cats/");
//! store
//!     .add_tree(
//!         &graph,
//!         &[
//!             EdgeRecord::new("A").with_label("root"),
//!             EdgeRecord::new("B").with_parent("A").with_label("lion"),
//!             EdgeRecord::new("C").with_parent("A").with_label("tiger"),
//!             EdgeRecord::new("D").with_parent("A").with_label("lynx"),
//!         ],
//!     )
//!     .unwrap();
//!
//! let result = SubtreeQuery::new(["lion", "tiger"]).in_graph(graph).execute(&store).unwrap();
//! assert_eq!(result.tree.size(), 3);
//! ```

pub mod config;
mod graph;
pub mod newick;
pub mod query;
pub mod storage;

pub use config::{ConfigError, TreestoreConfig};
pub use graph::{Clade, EdgeRecord, GraphId, NodeRef, Tree};
pub use query::{
    get_subtree, get_tree, BranchLengthDefault, CollapseLengths, MrcaFinder, MrcaResult, QueryError,
    QueryResult, SubtreeQuery, SubtreeResult, TreePruner, TreeReconstructor,
};
pub use storage::{GraphMatch, GraphSummary, OpenStore, SqliteStore, StorageError, StorageResult, TreeStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
