//! Most recent common ancestor of a set of requested taxa

use super::ancestry::{AncestorChain, AncestryIndex};
use super::error::{QueryError, QueryResult};
use super::resolve::{NameResolver, Resolution};
use crate::graph::{GraphId, NodeRef};
use crate::storage::TreeStore;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

/// What happened to one requested taxon
#[derive(Debug, Clone, PartialEq)]
pub enum TaxonStatus {
    /// Resolved and folded into the MRCA
    Accepted(Resolution),
    /// No node carries the label, directly or via a synonym
    NotFound,
    /// Resolved to a node without ancestors, so it could not seed the MRCA
    NoAncestry(Resolution),
    /// Resolved, but shares no ancestor with the taxa accepted before it
    Disjoint(Resolution),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxonOutcome {
    pub requested: String,
    pub status: TaxonStatus,
}

impl TaxonOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self.status, TaxonStatus::Accepted(_))
    }

    /// Label used in the tree, only for accepted taxa
    pub fn resolved_label(&self) -> Option<&str> {
        match &self.status {
            TaxonStatus::Accepted(r) => Some(r.label.as_str()),
            _ => None,
        }
    }
}

/// Result of an MRCA computation
#[derive(Debug, Clone)]
pub struct MrcaResult {
    pub mrca: NodeRef,
    /// One entry per requested taxon, in request order
    pub outcomes: Vec<TaxonOutcome>,
}

impl MrcaResult {
    /// Requested label -> label used in the tree, `None` when dropped
    pub fn mapping(&self) -> BTreeMap<String, Option<String>> {
        self.outcomes
            .iter()
            .map(|o| (o.requested.clone(), o.resolved_label().map(str::to_string)))
            .collect()
    }

    pub fn accepted(&self) -> impl Iterator<Item = &TaxonOutcome> {
        self.outcomes.iter().filter(|o| o.is_accepted())
    }

    /// Requested labels that did not make it into the MRCA
    pub fn dropped(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_accepted())
            .map(|o| o.requested.as_str())
            .collect()
    }

    /// Labels a pruned subtree must keep
    pub fn keep_set(&self) -> BTreeSet<String> {
        self.accepted()
            .filter_map(|o| o.resolved_label().map(str::to_string))
            .collect()
    }
}

/// Computes the MRCA of requested taxa within one graph
///
/// A left fold over the taxa: the first resolvable taxon seeds a running
/// chain (itself plus its ancestors), and every later taxon narrows the
/// chain to the suffix starting at the first of its own lineage found in
/// it. The head of the chain is the current MRCA.
pub struct MrcaFinder<'a, S: TreeStore + ?Sized> {
    graph: &'a GraphId,
    resolver: NameResolver<'a, S>,
    ancestry: AncestryIndex<'a, S>,
}

impl<'a, S: TreeStore + ?Sized> MrcaFinder<'a, S> {
    pub fn new(store: &'a S, graph: &'a GraphId) -> Self {
        Self {
            graph,
            resolver: NameResolver::new(store),
            ancestry: AncestryIndex::new(store, graph),
        }
    }

    pub fn with_taxonomy(mut self, taxonomy: Option<&'a GraphId>) -> Self {
        self.resolver = self.resolver.with_taxonomy(taxonomy);
        self
    }

    pub fn find<T: AsRef<str>>(&self, taxa: &[T]) -> QueryResult<MrcaResult> {
        if taxa.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let mut running: Option<AncestorChain> = None;
        let mut outcomes = Vec::with_capacity(taxa.len());

        for taxon in taxa {
            let requested = taxon.as_ref();
            let resolution = match self.resolver.resolve(self.graph, requested) {
                Ok(resolution) => resolution,
                Err(QueryError::NotFound(_)) => {
                    warn!(taxon = requested, graph = %self.graph, "taxon not found, dropping");
                    outcomes.push(TaxonOutcome {
                        requested: requested.to_string(),
                        status: TaxonStatus::NotFound,
                    });
                    continue;
                }
                Err(e) => return Err(e),
            };

            let status = match &running {
                None => {
                    let ancestors = self.ancestry.chain(&resolution.node)?;
                    if ancestors.is_empty() {
                        warn!(taxon = requested, "taxon has no ancestors, cannot anchor an MRCA");
                        TaxonStatus::NoAncestry(resolution)
                    } else {
                        running = Some(self.ancestry.lineage(&resolution.node)?);
                        TaxonStatus::Accepted(resolution)
                    }
                }
                Some(chain) => {
                    let lineage = self.ancestry.lineage(&resolution.node)?;
                    match first_shared(chain, &lineage) {
                        Some(index) => {
                            let narrowed = chain.suffix_from(index);
                            debug!(taxon = requested, mrca = ?narrowed.first().map(NodeRef::as_str), "narrowed MRCA");
                            running = Some(narrowed);
                            TaxonStatus::Accepted(resolution)
                        }
                        None => {
                            warn!(taxon = requested, "taxon shares no ancestor with the others, dropping");
                            TaxonStatus::Disjoint(resolution)
                        }
                    }
                }
            };
            outcomes.push(TaxonOutcome {
                requested: requested.to_string(),
                status,
            });
        }

        let mrca = running
            .and_then(|chain| chain.first().cloned())
            .ok_or(QueryError::NoCommonAncestor)?;
        Ok(MrcaResult { mrca, outcomes })
    }
}

/// Position in `chain` of the nearest member of `lineage` it contains
fn first_shared(chain: &AncestorChain, lineage: &AncestorChain) -> Option<usize> {
    let positions: HashMap<&NodeRef, usize> = chain.iter().enumerate().map(|(i, n)| (n, i)).collect();
    lineage.iter().find_map(|node| positions.get(node).copied())
}
