//! Newick serialization of reconstructed trees

use crate::graph::{Clade, Tree};

/// Characters that force a label into single quotes
const LABEL_DELIMITERS: &[char] = &['(', ')', '[', ']', '\'', ':', ';', ',', ' ', '\t', '\n', '\r'];

/// Returns the Newick representation of `tree` with closing semicolon.
///
/// Unlabeled clades are written without a name and missing branch lengths
/// without a `:length` suffix, so a missing length and a zero length stay
/// distinguishable.
///
/// # Example
/// ```
/// use treestore::{Clade, Tree};
/// use treestore::newick::to_newick;
///
/// let tree = Tree::new(
///     Clade::new(None, None)
///         .with_child(Clade::named("lion", Some(1.5)))
///         .with_child(Clade::named("dog", Some(3.0))),
/// );
/// assert_eq!(to_newick(&tree), "(lion:1.5,dog:3);");
/// ```
pub fn to_newick(tree: &Tree) -> String {
    let mut newick = String::with_capacity(tree.size() * 16);
    write_clade(&tree.root, &mut newick);
    newick.push(';');
    newick
}

fn write_clade(clade: &Clade, newick: &mut String) {
    if !clade.children.is_empty() {
        newick.push('(');
        for (i, child) in clade.children.iter().enumerate() {
            if i > 0 {
                newick.push(',');
            }
            write_clade(child, newick);
        }
        newick.push(')');
    }
    if let Some(name) = &clade.name {
        newick.push_str(&escape_label(name));
    }
    if let Some(length) = clade.branch_length {
        newick.push(':');
        newick.push_str(&length.to_string());
    }
}

/// Quote a label when it contains a Newick delimiter
///
/// Inner single quotes are doubled, as Newick requires.
pub fn escape_label(label: &str) -> String {
    if label.is_empty() || !label.contains(LABEL_DELIMITERS) {
        return label.to_string();
    }
    let mut quoted = String::with_capacity(label.len() + 2);
    quoted.push('\'');
    for ch in label.chars() {
        if ch == '\'' {
            quoted.push('\'');
        }
        quoted.push(ch);
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_with_internal_labels() {
        let tree = Tree::new(
            Clade::named("root", None)
                .with_child(Clade::named("cat", Some(2.0)).with_child(Clade::named("lion", Some(1.5))))
                .with_child(Clade::named("dog", Some(3.0))),
        );
        assert_eq!(to_newick(&tree), "((lion:1.5)cat:2,dog:3)root;");
    }

    #[test]
    fn test_zero_length_differs_from_missing() {
        let tree = Tree::new(
            Clade::new(None, None)
                .with_child(Clade::named("a", Some(0.0)))
                .with_child(Clade::named("b", None)),
        );
        assert_eq!(to_newick(&tree), "(a:0,b);");
    }

    #[test]
    fn test_single_node() {
        let tree = Tree::new(Clade::named("lion", None));
        assert_eq!(to_newick(&tree), "lion;");
    }

    #[test]
    fn test_escape_label() {
        assert_eq!(escape_label("Panthera_leo"), "Panthera_leo");
        assert_eq!(escape_label("Panthera leo"), "'Panthera leo'");
        assert_eq!(escape_label("O'Brien's kiwi"), "'O''Brien''s kiwi'");
        assert_eq!(escape_label("a:b"), "'a:b'");
    }
}
