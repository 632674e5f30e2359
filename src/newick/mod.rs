//! Newick reading and writing
//!
//! Just enough of the format to load trees into the store and print query
//! results: nested parentheses, labels (quoted or not), branch lengths and
//! bracketed comments, which are skipped.

mod parser;
mod writer;

pub use parser::{parse_newick, NewickError};
pub use writer::{escape_label, to_newick};
