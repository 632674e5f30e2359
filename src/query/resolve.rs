//! Taxon label resolution with synonym fallback

use super::error::{QueryError, QueryResult};
use crate::graph::{GraphId, NodeRef};
use crate::storage::TreeStore;
use tracing::{debug, warn};

/// Marker for an unidentified species ("Panthera sp.")
const UNIDENTIFIED_SPECIES: &str = "sp.";

/// Where a requested label ended up in the target graph
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub node: NodeRef,
    /// The label the node carries in the target graph
    pub label: String,
    /// True when the label was reached through a taxonomy synonym
    pub synonym_used: bool,
}

/// Maps requested taxon labels to nodes of a target graph
///
/// Lookup order: the label verbatim, then the genus of an `"X sp."` label,
/// then (given a taxonomy graph) the canonical names those labels are
/// synonyms of.
pub struct NameResolver<'a, S: TreeStore + ?Sized> {
    store: &'a S,
    taxonomy: Option<&'a GraphId>,
}

impl<'a, S: TreeStore + ?Sized> NameResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store, taxonomy: None }
    }

    /// Consult `taxonomy` for synonyms when a label has no direct match
    pub fn with_taxonomy(mut self, taxonomy: Option<&'a GraphId>) -> Self {
        self.taxonomy = taxonomy;
        self
    }

    /// Resolve `label` within `graph`
    ///
    /// Returns `QueryError::NotFound` when no path leads to a node.
    pub fn resolve(&self, graph: &GraphId, label: &str) -> QueryResult<Resolution> {
        let candidates = candidate_labels(label);
        for candidate in &candidates {
            if let Some(node) = self.store.resolve_name(graph, candidate)? {
                debug!(label, matched = %candidate, node = %node, "resolved taxon");
                return Ok(Resolution {
                    node,
                    label: candidate.clone(),
                    synonym_used: false,
                });
            }
        }

        if let Some(taxonomy) = self.taxonomy {
            for candidate in &candidates {
                let Some(synonym) = self.store.resolve_synonym(taxonomy, candidate)? else {
                    continue;
                };
                if let Some(node) = self.store.resolve_name(graph, &synonym.canonical_label)? {
                    warn!(label, canonical = %synonym.canonical_label, "substituted synonym");
                    return Ok(Resolution {
                        node,
                        label: synonym.canonical_label,
                        synonym_used: true,
                    });
                }
            }
        }

        Err(QueryError::NotFound(label.to_string()))
    }
}

/// Labels tried for a requested taxon, in lookup order
///
/// Graph ranking uses the same list so that a graph is only ranked for a
/// taxon the resolver can find in it.
pub(crate) fn candidate_labels(label: &str) -> Vec<String> {
    let mut candidates = vec![label.to_string()];
    candidates.extend(genus_of_unidentified(label));
    candidates
}

/// `"Panthera sp."` -> `Some("Panthera")`
fn genus_of_unidentified(label: &str) -> Option<String> {
    let words: Vec<&str> = label.split_whitespace().collect();
    match words.split_last() {
        Some((&last, rest)) if last == UNIDENTIFIED_SPECIES && !rest.is_empty() => Some(rest.join(" ")),
        _ => None,
    }
}
