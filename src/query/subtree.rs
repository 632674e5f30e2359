//! Subtree queries: resolve, anchor at the MRCA, rebuild, prune

use super::error::{QueryError, QueryResult};
use super::mrca::{MrcaFinder, MrcaResult};
use super::prune::{CollapseLengths, TreePruner};
use super::reconstruct::{BranchLengthDefault, TreeReconstructor};
use crate::graph::{GraphId, Tree};
use crate::storage::TreeStore;
use tracing::{debug, info};

/// Query for the minimal subtree containing a set of taxa
#[derive(Debug, Clone)]
pub struct SubtreeQuery {
    /// Requested taxon labels, deduplicated, in request order
    pub taxa: Vec<String>,
    /// Graph to search; chosen automatically when absent
    pub graph: Option<GraphId>,
    /// Taxonomy graph consulted for synonyms
    pub taxonomy: Option<GraphId>,
    /// Return the whole clade below the MRCA instead of pruning it
    pub complete: bool,
    pub branch_lengths: BranchLengthDefault,
    pub collapse: CollapseLengths,
}

/// Result of a subtree query
#[derive(Debug, Clone)]
pub struct SubtreeResult {
    /// Graph the subtree was taken from
    pub graph: GraphId,
    pub tree: Tree,
    pub mrca: MrcaResult,
}

impl SubtreeQuery {
    pub fn new<I, T>(taxa: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for taxon in taxa {
            let taxon = taxon.into();
            if !unique.contains(&taxon) {
                unique.push(taxon);
            }
        }
        Self {
            taxa: unique,
            graph: None,
            taxonomy: None,
            complete: false,
            branch_lengths: BranchLengthDefault::default(),
            collapse: CollapseLengths::default(),
        }
    }

    pub fn in_graph(mut self, graph: impl Into<GraphId>) -> Self {
        self.graph = Some(graph.into());
        self
    }

    pub fn with_taxonomy(mut self, taxonomy: impl Into<GraphId>) -> Self {
        self.taxonomy = Some(taxonomy.into());
        self
    }

    pub fn complete(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }

    pub fn branch_lengths(mut self, branch_lengths: BranchLengthDefault) -> Self {
        self.branch_lengths = branch_lengths;
        self
    }

    pub fn collapse(mut self, collapse: CollapseLengths) -> Self {
        self.collapse = collapse;
        self
    }

    /// Execute the query against a store
    pub fn execute<S: TreeStore + ?Sized>(&self, store: &S) -> QueryResult<SubtreeResult> {
        if self.taxa.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let graph = match &self.graph {
            Some(graph) => graph.clone(),
            None => self.select_graph(store)?,
        };

        let mrca = MrcaFinder::new(store, &graph)
            .with_taxonomy(self.taxonomy.as_ref())
            .find(&self.taxa)?;
        info!(graph = %graph, mrca = %mrca.mrca, dropped = mrca.dropped().len(), "found MRCA");

        let rows = store.subtree_rows(&graph, Some(&mrca.mrca))?;
        let tree = TreeReconstructor::new(self.branch_lengths).reconstruct(rows, Some(&mrca.mrca))?;

        let tree = if self.complete {
            tree
        } else {
            TreePruner::new(self.collapse).prune(tree, &mrca.keep_set())
        };

        Ok(SubtreeResult { graph, tree, mrca })
    }

    /// The stored graph containing the most requested taxa
    fn select_graph<S: TreeStore + ?Sized>(&self, store: &S) -> QueryResult<GraphId> {
        let ranked = store.graphs_containing(&self.taxa, self.taxonomy.as_ref())?;
        let best = ranked.into_iter().next().ok_or(QueryError::NoMatchingTree)?;
        debug!(graph = %best.graph, matches = best.matches, "selected graph");
        Ok(best.graph)
    }
}

/// Minimal (or, with `full`, complete) subtree spanning `taxa` in `graph`
///
/// Runs with the default `BranchLengthDefault` and `CollapseLengths`.
/// Build a `SubtreeQuery` to choose either policy.
pub fn get_subtree<S: TreeStore + ?Sized>(
    store: &S,
    graph: &GraphId,
    taxa: &[String],
    taxonomy: Option<&GraphId>,
    full: bool,
) -> QueryResult<Tree> {
    let mut query = SubtreeQuery::new(taxa.iter().cloned()).in_graph(graph.clone()).complete(full);
    query.taxonomy = taxonomy.cloned();
    Ok(query.execute(store)?.tree)
}

/// Rebuild a whole stored tree
pub fn get_tree<S: TreeStore + ?Sized>(
    store: &S,
    graph: &GraphId,
    branch_lengths: BranchLengthDefault,
) -> QueryResult<Tree> {
    let rows = store.subtree_rows(graph, None)?;
    TreeReconstructor::new(branch_lengths).reconstruct(rows, None)
}
