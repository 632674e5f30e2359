//! In-memory rooted trees assembled by a single query

use super::node::{GraphId, NodeRef};
use super::record::EdgeRecord;
use serde::{Deserialize, Serialize};

/// A node of a phylogenetic tree together with its descendants
///
/// Children are owned; there are no parent pointers, so navigation is
/// top-down only. Child order is discovery order and carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Clade {
    pub name: Option<String>,
    pub branch_length: Option<f64>,
    pub children: Vec<Clade>,
}

impl Clade {
    pub fn new(name: Option<String>, branch_length: Option<f64>) -> Self {
        Self {
            name,
            branch_length,
            children: Vec::new(),
        }
    }

    /// Labeled clade with an optional edge length
    pub fn named(name: impl Into<String>, branch_length: Option<f64>) -> Self {
        Self::new(Some(name.into()), branch_length)
    }

    pub fn with_child(mut self, child: Clade) -> Self {
        self.children.push(child);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of clades in this subtree, including self
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Clade::size).sum::<usize>()
    }

    /// Names of all leaves below (or at) this clade, in depth-first order
    pub fn leaf_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_leaf_names(&mut names);
        names
    }

    fn collect_leaf_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        if self.is_leaf() {
            if let Some(name) = self.name.as_deref() {
                out.push(name);
            }
            return;
        }
        for child in &self.children {
            child.collect_leaf_names(out);
        }
    }

    /// First clade (pre-order) carrying `name`
    pub fn find(&self, name: &str) -> Option<&Clade> {
        if self.name.as_deref() == Some(name) {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    /// Sort children recursively by their structural signature
    ///
    /// Two clades describing the same topology (same labels, lengths and
    /// parent/child relations) compare equal after canonicalization,
    /// whatever order their children were discovered in.
    pub fn canonicalize(&mut self) {
        for child in &mut self.children {
            child.canonicalize();
        }
        self.children.sort_by_cached_key(Clade::signature);
    }

    fn signature(&self) -> String {
        let mut sig = String::new();
        if !self.children.is_empty() {
            sig.push('(');
            let parts: Vec<String> = self.children.iter().map(Clade::signature).collect();
            sig.push_str(&parts.join(","));
            sig.push(')');
        }
        if let Some(name) = &self.name {
            sig.push_str(name);
        }
        if let Some(length) = self.branch_length {
            sig.push(':');
            sig.push_str(&length.to_string());
        }
        sig
    }
}

/// A rooted tree, alive for the duration of one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub root: Clade,
    pub rooted: bool,
}

impl Tree {
    pub fn new(root: Clade) -> Self {
        Self { root, rooted: true }
    }

    /// Number of clades in the tree
    pub fn size(&self) -> usize {
        self.root.size()
    }

    pub fn leaf_names(&self) -> Vec<&str> {
        self.root.leaf_names()
    }

    pub fn find(&self, name: &str) -> Option<&Clade> {
        self.root.find(name)
    }

    /// Canonical copy for order-insensitive comparison
    pub fn canonical(&self) -> Tree {
        let mut tree = self.clone();
        tree.root.canonicalize();
        tree
    }

    /// Flatten into edge records, root first, in pre-order
    ///
    /// Node refs are minted fresh under `graph`.
    pub fn to_records(&self, graph: &GraphId) -> Vec<EdgeRecord> {
        let mut records = Vec::with_capacity(self.size());
        flatten(&self.root, None, graph, &mut records);
        records
    }
}

fn flatten(clade: &Clade, parent: Option<&NodeRef>, graph: &GraphId, out: &mut Vec<EdgeRecord>) {
    let node = NodeRef::mint(graph);
    out.push(EdgeRecord {
        node: node.clone(),
        branch_length: clade.branch_length,
        parent: parent.cloned(),
        label: clade.name.clone(),
    });
    for child in &clade.children {
        flatten(child, Some(&node), graph, out);
    }
}
