//! Assembly of unordered edge records into a rooted tree

use super::error::{QueryError, QueryResult};
use crate::graph::{Clade, EdgeRecord, NodeRef, Tree};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// How many unplaced nodes an `IncompleteTree` error reports
const SAMPLE_LIMIT: usize = 5;

/// Branch length given to records that carry none
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchLengthDefault {
    /// Leave the length absent
    #[default]
    Missing,
    Zero,
    One,
    Fixed(f64),
}

impl BranchLengthDefault {
    pub fn apply(self, length: Option<f64>) -> Option<f64> {
        length.or(match self {
            Self::Missing => None,
            Self::Zero => Some(0.0),
            Self::One => Some(1.0),
            Self::Fixed(value) => Some(value),
        })
    }
}

/// A clade under construction; children are arena indices
struct Slot {
    clade: Clade,
    children: Vec<usize>,
    placed: bool,
}

/// Builds a `Tree` from an unordered batch of `EdgeRecord`s
///
/// Records whose parent has not been seen yet are requeued and retried on
/// the next pass. Passes repeat until every record is placed or a pass
/// changes nothing, which means some parent reference dangles.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeReconstructor {
    branch_lengths: BranchLengthDefault,
}

impl TreeReconstructor {
    pub fn new(branch_lengths: BranchLengthDefault) -> Self {
        Self { branch_lengths }
    }

    /// Assemble `records` into a tree rooted at `anchor`
    ///
    /// With no anchor the root is the parentless record.
    pub fn reconstruct(
        &self,
        records: impl IntoIterator<Item = EdgeRecord>,
        anchor: Option<&NodeRef>,
    ) -> QueryResult<Tree> {
        let mut slots: Vec<Slot> = Vec::new();
        let mut index: HashMap<NodeRef, usize> = HashMap::new();
        let mut root: Option<usize> = None;
        let mut pending: Vec<EdgeRecord> = records.into_iter().collect();
        let mut pass = 0usize;

        while !pending.is_empty() {
            pass += 1;
            let known_before = slots.len();
            let mut placed = 0usize;
            let mut requeue = Vec::new();

            for record in pending {
                let slot = match index.get(&record.node) {
                    Some(&slot) => slot,
                    None => {
                        slots.push(Slot {
                            clade: Clade::new(record.label.clone(), self.branch_lengths.apply(record.branch_length)),
                            children: Vec::new(),
                            placed: false,
                        });
                        index.insert(record.node.clone(), slots.len() - 1);
                        slots.len() - 1
                    }
                };

                // repeated row for a node already in the tree
                if slots[slot].placed {
                    placed += 1;
                    continue;
                }

                let is_root = match anchor {
                    Some(anchor) => &record.node == anchor,
                    None => record.is_parentless(),
                };
                if is_root && root.is_none() {
                    root = Some(slot);
                    slots[slot].placed = true;
                    placed += 1;
                    continue;
                }

                match record.parent.as_ref().and_then(|p| index.get(p)).copied() {
                    Some(parent) if parent != slot => {
                        slots[parent].children.push(slot);
                        slots[slot].placed = true;
                        placed += 1;
                    }
                    _ => requeue.push(record),
                }
            }

            debug!(pass, placed, pending = requeue.len(), "reconstruction pass");
            pending = requeue;

            if placed == 0 && slots.len() == known_before {
                break;
            }
        }

        if !pending.is_empty() {
            return Err(QueryError::IncompleteTree {
                pending: pending.len(),
                samples: pending.into_iter().take(SAMPLE_LIMIT).map(|r| r.node).collect(),
            });
        }

        let Some(root) = root else {
            return Err(QueryError::IncompleteTree {
                pending: 0,
                samples: anchor.cloned().into_iter().collect(),
            });
        };

        assemble(slots, root, &index)
    }
}

/// Turn the arena into owned clades, bottom-up
fn assemble(mut slots: Vec<Slot>, root: usize, index: &HashMap<NodeRef, usize>) -> QueryResult<Tree> {
    let mut order = Vec::with_capacity(slots.len());
    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        order.push(i);
        stack.extend(slots[i].children.iter().rev());
    }

    // every placed node must hang below the root
    if order.len() != slots.len() {
        let mut reachable = vec![false; slots.len()];
        for &i in &order {
            reachable[i] = true;
        }
        let mut stray: Vec<&NodeRef> = index.iter().filter(|(_, i)| !reachable[**i]).map(|(n, _)| n).collect();
        stray.sort();
        return Err(QueryError::IncompleteTree {
            pending: slots.len() - order.len(),
            samples: stray.into_iter().take(SAMPLE_LIMIT).cloned().collect(),
        });
    }

    let mut built: Vec<Option<Clade>> = slots.iter_mut().map(|s| Some(std::mem::take(&mut s.clade))).collect();
    for &i in order.iter().rev() {
        let children: Vec<Clade> = slots[i].children.iter().filter_map(|&c| built[c].take()).collect();
        if let Some(clade) = built[i].as_mut() {
            clade.children = children;
        }
    }

    let root = built[root].take().unwrap_or_default();
    Ok(Tree::new(root))
}
