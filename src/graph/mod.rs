//! Core tree data structures

mod node;
mod record;
mod tree;


pub use node::{GraphId, NodeRef};
pub use record::EdgeRecord;
pub use tree::{Clade, Tree};
