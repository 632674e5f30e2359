//! Reduction of a tree to the minimal topology spanning the kept taxa

use crate::graph::{Clade, Tree};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What happens to the length of an edge removed by collapsing a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollapseLengths {
    /// Drop the collapsed edge's length; the spliced child keeps its own
    #[default]
    Discard,
    /// Add the collapsed edge's length onto the spliced child
    Sum,
}

/// Prunes a tree down to the clades that distinguish a set of labels
///
/// Post-order: a non-root clade whose name is not kept and which has at
/// most one child left is removed, its only child (if any) taking its
/// place. The root is never removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreePruner {
    collapse: CollapseLengths,
}

impl TreePruner {
    pub fn new(collapse: CollapseLengths) -> Self {
        Self { collapse }
    }

    pub fn prune(&self, mut tree: Tree, keep: &BTreeSet<String>) -> Tree {
        self.prune_clade(&mut tree.root, keep, true);
        tree
    }

    /// Returns true when `clade` should be collapsed into its parent
    fn prune_clade(&self, clade: &mut Clade, keep: &BTreeSet<String>, is_root: bool) -> bool {
        let children = std::mem::take(&mut clade.children);
        for mut child in children {
            if !self.prune_clade(&mut child, keep, false) {
                clade.children.push(child);
                continue;
            }
            if let Some(mut grandchild) = child.children.pop() {
                if self.collapse == CollapseLengths::Sum {
                    grandchild.branch_length = sum_lengths(child.branch_length, grandchild.branch_length);
                }
                clade.children.push(grandchild);
            }
        }

        let kept = clade.name.as_ref().is_some_and(|name| keep.contains(name));
        !is_root && !kept && clade.children.len() <= 1
    }
}

fn sum_lengths(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    match (a, b) {
        (None, None) => None,
        (a, b) => Some(a.unwrap_or(0.0) + b.unwrap_or(0.0)),
    }
}
