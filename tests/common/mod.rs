//! Common test utilities for treestore integration tests
//!
//! Fixture trees as edge rows, random tree generation for the
//! order-independence and MRCA checks, and store setup helpers.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use treestore::{EdgeRecord, GraphId, NodeRef, OpenStore, SqliteStore, TreeStore};

pub fn animals_graph() -> GraphId {
    GraphId::from("http://example.org/animals/")
}

/// root -> (cat -> (lion, tiger), dog), with a pantherine node between
/// cat and the two big cats
pub fn animal_records() -> Vec<EdgeRecord> {
    vec![
        EdgeRecord::new("A").with_branch_length(1.0).with_label("root"),
        EdgeRecord::new("B").with_branch_length(2.0).with_parent("A").with_label("cat"),
        EdgeRecord::new("C").with_branch_length(3.0).with_parent("A").with_label("dog"),
        EdgeRecord::new("X").with_branch_length(0.5).with_parent("B").with_label("Panthera"),
        EdgeRecord::new("D").with_branch_length(1.5).with_parent("X").with_label("lion"),
        EdgeRecord::new("E").with_branch_length(1.5).with_parent("X").with_label("tiger"),
        EdgeRecord::new("F").with_branch_length(2.5).with_parent("B").with_label("lynx"),
    ]
}

pub fn animal_store() -> SqliteStore {
    let store = SqliteStore::open_in_memory().expect("in-memory store");
    store.add_tree(&animals_graph(), &animal_records()).expect("add animals");
    store
}

/// A random rooted tree of `size` nodes `n0..n{size-1}` labeled `t0..`
///
/// Node `n0` is the root; every other node hangs below a lower-numbered one.
pub struct RandomTree {
    pub records: Vec<EdgeRecord>,
    pub parents: HashMap<NodeRef, NodeRef>,
}

impl RandomTree {
    pub fn generate(size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut records = Vec::with_capacity(size);
        let mut parents = HashMap::new();

        records.push(EdgeRecord::new("n0").with_label("t0"));
        for i in 1..size {
            let parent = format!("n{}", rng.gen_range(0..i));
            let length = f64::from(rng.gen_range(1..100u32)) / 10.0;
            parents.insert(NodeRef::from(format!("n{}", i)), NodeRef::from(parent.as_str()));
            records.push(
                EdgeRecord::new(format!("n{}", i))
                    .with_parent(parent.as_str())
                    .with_label(format!("t{}", i))
                    .with_branch_length(length),
            );
        }
        Self { records, parents }
    }

    /// `node` followed by its ancestors, nearest first
    pub fn lineage(&self, node: &NodeRef) -> Vec<NodeRef> {
        let mut chain = vec![node.clone()];
        let mut current = node;
        while let Some(parent) = self.parents.get(current) {
            chain.push(parent.clone());
            current = parent;
        }
        chain
    }

    pub fn is_ancestor_or_self(&self, ancestor: &NodeRef, node: &NodeRef) -> bool {
        self.lineage(node).contains(ancestor)
    }

    pub fn children(&self, node: &NodeRef) -> Vec<NodeRef> {
        self.parents
            .iter()
            .filter(|(_, parent)| *parent == node)
            .map(|(child, _)| child.clone())
            .collect()
    }
}
