//! Subtree query engine
//!
//! Resolves requested taxa to nodes, finds their most recent common
//! ancestor, rebuilds the subtree below it from unordered store rows and
//! prunes it back to the minimal topology spanning the taxa.

mod ancestry;
mod error;
mod mrca;
mod prune;
mod reconstruct;
mod resolve;
mod subtree;

pub use ancestry::{AncestorChain, AncestryIndex};
pub use error::{QueryError, QueryResult};
pub use mrca::{MrcaFinder, MrcaResult, TaxonOutcome, TaxonStatus};
pub use prune::{CollapseLengths, TreePruner};
pub use reconstruct::{BranchLengthDefault, TreeReconstructor};
pub use resolve::{NameResolver, Resolution};
pub(crate) use resolve::candidate_labels;
pub use subtree::{get_subtree, get_tree, SubtreeQuery, SubtreeResult};
