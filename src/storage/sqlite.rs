//! SQLite storage backend

use super::traits::{
    GraphMatch, GraphSummary, OpenStore, StorageError, StorageResult, SynonymMatch, TreeStore,
};
use crate::graph::{EdgeRecord, GraphId, NodeRef};
use crate::query::candidate_labels;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};

/// Upper bound on ancestor walks, guarding against cyclic parent links
const MAX_ANCESTOR_DEPTH: i64 = 10_000;

/// SQLite-backed tree store
///
/// Every graph is a set of rows in `nodes` keyed by `(graph_id, id)`, each
/// row pointing at its parent. Alternate taxon names for taxonomy graphs
/// live in `synonyms`. Thread-safe via internal mutex on the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Initialize the database schema
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            -- Enable foreign keys
            PRAGMA foreign_keys = ON;

            -- Enable WAL mode for concurrent reads during writes
            PRAGMA journal_mode = WAL;

            CREATE TABLE IF NOT EXISTS graphs (
                id TEXT PRIMARY KEY,
                loaded_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS nodes (
                graph_id TEXT NOT NULL,
                id TEXT NOT NULL,
                parent_id TEXT,
                label TEXT,
                branch_length REAL,
                PRIMARY KEY (graph_id, id),
                FOREIGN KEY (graph_id) REFERENCES graphs(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_nodes_label
                ON nodes(graph_id, label);
            CREATE INDEX IF NOT EXISTS idx_nodes_parent
                ON nodes(graph_id, parent_id);
            CREATE INDEX IF NOT EXISTS idx_nodes_label_any_graph
                ON nodes(label);

            CREATE TABLE IF NOT EXISTS synonyms (
                graph_id TEXT NOT NULL,
                node_id TEXT NOT NULL,
                label TEXT NOT NULL,
                PRIMARY KEY (graph_id, node_id, label),
                FOREIGN KEY (graph_id, node_id) REFERENCES nodes(graph_id, id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_synonyms_label
                ON synonyms(graph_id, label);
            "#,
        )?;
        Ok(())
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    fn graph_exists_with(conn: &Connection, graph: &GraphId) -> StorageResult<bool> {
        let found: Option<i64> = conn
            .query_row("SELECT 1 FROM graphs WHERE id = ?1", params![graph.as_str()], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }

    /// Taxonomy node carrying `label` as an alternate name, earliest first
    fn synonym_with(conn: &Connection, taxonomy: &GraphId, label: &str) -> StorageResult<Option<SynonymMatch>> {
        let row: Option<(String, String)> = conn
            .query_row(
                r#"
                SELECT n.id, n.label FROM synonyms s
                    JOIN nodes n ON n.graph_id = s.graph_id AND n.id = s.node_id
                    WHERE s.graph_id = ?1 AND s.label = ?2 AND n.label IS NOT NULL
                    ORDER BY n.rowid
                    LIMIT 1
                "#,
                params![taxonomy.as_str(), label],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        Ok(row.map(|(id, canonical_label)| SynonymMatch {
            node: NodeRef::from_string(id),
            canonical_label,
        }))
    }

    fn row_to_record(
        id: String,
        branch_length: Option<f64>,
        parent_id: Option<String>,
        label: Option<String>,
    ) -> EdgeRecord {
        EdgeRecord {
            node: NodeRef::from_string(id),
            branch_length,
            parent: parent_id.map(NodeRef::from_string),
            label,
        }
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl TreeStore for SqliteStore {
    // === Query boundary ===

    fn resolve_name(&self, graph: &GraphId, label: &str) -> StorageResult<Option<NodeRef>> {
        let conn = self.conn()?;
        let id: Option<String> = conn
            .query_row(
                "SELECT id FROM nodes WHERE graph_id = ?1 AND label = ?2 ORDER BY rowid LIMIT 1",
                params![graph.as_str(), label],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id.map(NodeRef::from_string))
    }

    fn resolve_synonym(&self, taxonomy: &GraphId, label: &str) -> StorageResult<Option<SynonymMatch>> {
        let conn = self.conn()?;
        Self::synonym_with(&conn, taxonomy, label)
    }

    fn ancestor_chain(&self, graph: &GraphId, node: &NodeRef) -> StorageResult<Vec<NodeRef>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            WITH RECURSIVE chain(id, depth) AS (
                SELECT parent_id, 1 FROM nodes
                    WHERE graph_id = ?1 AND id = ?2 AND parent_id IS NOT NULL
                UNION ALL
                SELECT n.parent_id, c.depth + 1 FROM nodes n
                    JOIN chain c ON n.graph_id = ?1 AND n.id = c.id
                    WHERE n.parent_id IS NOT NULL AND c.depth < ?3
            )
            SELECT id FROM chain ORDER BY depth
            "#,
        )?;
        let chain = stmt
            .query_map(params![graph.as_str(), node.as_str(), MAX_ANCESTOR_DEPTH], |row| {
                row.get::<_, String>(0)
            })?
            .map(|r| r.map(NodeRef::from_string))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(chain)
    }

    fn subtree_rows(&self, graph: &GraphId, anchor: Option<&NodeRef>) -> StorageResult<Vec<EdgeRecord>> {
        let conn = self.conn()?;
        if !Self::graph_exists_with(&conn, graph)? {
            return Err(StorageError::GraphNotFound(graph.to_string()));
        }

        type RawRow = (String, Option<f64>, Option<String>, Option<String>);
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<RawRow> {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<f64>>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        };

        let rows = match anchor {
            Some(anchor) => {
                let mut stmt = conn.prepare(
                    r#"
                    WITH RECURSIVE sub(id) AS (
                        SELECT id FROM nodes WHERE graph_id = ?1 AND id = ?2
                        UNION
                        SELECT n.id FROM nodes n
                            JOIN sub s ON n.graph_id = ?1 AND n.parent_id = s.id
                    )
                    SELECT n.id, n.branch_length, n.parent_id, n.label FROM nodes n
                        JOIN sub s ON n.graph_id = ?1 AND n.id = s.id
                        ORDER BY n.rowid
                    "#,
                )?;
                let rows = stmt
                    .query_map(params![graph.as_str(), anchor.as_str()], map_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, branch_length, parent_id, label FROM nodes WHERE graph_id = ?1 ORDER BY rowid",
                )?;
                let rows = stmt
                    .query_map(params![graph.as_str()], map_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };

        debug!(graph = %graph, anchor = ?anchor.map(NodeRef::as_str), rows = rows.len(), "fetched subtree rows");
        Ok(rows
            .into_iter()
            .map(|(id, length, parent, label)| Self::row_to_record(id, length, parent, label))
            .collect())
    }

    // === Graph management ===

    fn add_tree(&self, graph: &GraphId, records: &[EdgeRecord]) -> StorageResult<usize> {
        let mut conn = self.conn()?;
        if Self::graph_exists_with(&conn, graph)? {
            return Err(StorageError::DuplicateGraph(graph.to_string()));
        }

        let tx = conn.transaction()?;
        tx.execute(
            "INSERT INTO graphs (id, loaded_at) VALUES (?1, ?2)",
            params![graph.as_str(), chrono::Utc::now().to_rfc3339()],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO nodes (graph_id, id, parent_id, label, branch_length) VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in records {
                stmt.execute(params![
                    graph.as_str(),
                    record.node.as_str(),
                    record.parent.as_ref().map(NodeRef::as_str),
                    record.label,
                    record.branch_length,
                ])?;
            }
        }
        tx.commit()?;

        info!(graph = %graph, nodes = records.len(), "loaded tree");
        Ok(records.len())
    }

    fn add_synonyms(&self, taxonomy: &GraphId, pairs: &[(String, String)]) -> StorageResult<usize> {
        let mut conn = self.conn()?;
        if !Self::graph_exists_with(&conn, taxonomy)? {
            return Err(StorageError::GraphNotFound(taxonomy.to_string()));
        }

        let tx = conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                r#"
                INSERT OR IGNORE INTO synonyms (graph_id, node_id, label)
                    SELECT graph_id, id, ?3 FROM nodes WHERE graph_id = ?1 AND label = ?2
                "#,
            )?;
            for (canonical, synonym) in pairs {
                let rows = stmt.execute(params![taxonomy.as_str(), canonical, synonym])?;
                if rows == 0 {
                    debug!(taxonomy = %taxonomy, canonical = %canonical, "no taxonomy node for synonym");
                }
                inserted += rows;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    fn remove_graph(&self, graph: &GraphId) -> StorageResult<bool> {
        let conn = self.conn()?;
        let rows = conn.execute("DELETE FROM graphs WHERE id = ?1", params![graph.as_str()])?;
        if rows > 0 {
            info!(graph = %graph, "removed graph");
        }
        Ok(rows > 0)
    }

    fn graph_exists(&self, graph: &GraphId) -> StorageResult<bool> {
        let conn = self.conn()?;
        Self::graph_exists_with(&conn, graph)
    }

    fn list_graphs(&self) -> StorageResult<Vec<GraphSummary>> {
        use chrono::DateTime;

        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT g.id, g.loaded_at, COUNT(n.label) FROM graphs g
                LEFT JOIN nodes n ON n.graph_id = g.id
                GROUP BY g.id
                ORDER BY g.id
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, i64>(2)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(id, loaded_at, taxa)| {
                Ok(GraphSummary {
                    graph: GraphId::from_string(id),
                    taxa: taxa as usize,
                    loaded_at: DateTime::parse_from_rfc3339(&loaded_at)
                        .map_err(|e| StorageError::DateParse(e.to_string()))?
                        .with_timezone(&chrono::Utc),
                })
            })
            .collect()
    }

    fn graphs_containing(&self, labels: &[String], taxonomy: Option<&GraphId>) -> StorageResult<Vec<GraphMatch>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT DISTINCT graph_id FROM nodes WHERE label = ?1")?;

        // graph id -> indices of requested labels it contains
        let mut hits: HashMap<String, BTreeSet<usize>> = HashMap::new();
        for (index, label) in labels.iter().enumerate() {
            // same lookups as NameResolver: verbatim, genus, then canonical names
            let mut candidates = candidate_labels(label);
            if let Some(taxonomy) = taxonomy {
                for candidate in candidate_labels(label) {
                    if let Some(synonym) = Self::synonym_with(&conn, taxonomy, &candidate)? {
                        candidates.push(synonym.canonical_label);
                    }
                }
            }
            for candidate in &candidates {
                let graphs = stmt
                    .query_map(params![candidate], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                for graph in graphs {
                    hits.entry(graph).or_default().insert(index);
                }
            }
        }

        let mut matches: Vec<GraphMatch> = hits
            .into_iter()
            .map(|(graph, found)| GraphMatch {
                graph: GraphId::from_string(graph),
                matches: found.len(),
            })
            .collect();
        matches.sort_by(|a, b| {
            b.matches
                .cmp(&a.matches)
                .then_with(|| a.graph.is_taxonomy().cmp(&b.graph.is_taxonomy()))
                .then_with(|| a.graph.cmp(&b.graph))
        });
        Ok(matches)
    }

    fn names(&self, graph: Option<&GraphId>) -> StorageResult<Vec<String>> {
        let conn = self.conn()?;
        let names = match graph {
            Some(graph) => {
                let mut stmt = conn.prepare(
                    "SELECT DISTINCT label FROM nodes WHERE graph_id = ?1 AND label IS NOT NULL ORDER BY label",
                )?;
                let names = stmt
                    .query_map(params![graph.as_str()], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                names
            }
            None => {
                let mut stmt =
                    conn.prepare("SELECT DISTINCT label FROM nodes WHERE label IS NOT NULL ORDER BY label")?;
                let names = stmt
                    .query_map([], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                names
            }
        };
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    /// root -> (cat -> lion, dog)
    fn cats_records() -> Vec<EdgeRecord> {
        vec![
            EdgeRecord::new("A").with_label("root").with_branch_length(1.0),
            EdgeRecord::new("B").with_parent("A").with_label("cat").with_branch_length(2.0),
            EdgeRecord::new("C").with_parent("A").with_label("dog").with_branch_length(3.0),
            EdgeRecord::new("D").with_parent("B").with_label("lion").with_branch_length(1.5),
        ]
    }

    fn graph() -> GraphId {
        GraphId::from("http://example.org/cats/")
    }

    #[test]
    fn test_add_and_resolve_name() {
        let store = create_test_store();
        assert_eq!(store.add_tree(&graph(), &cats_records()).unwrap(), 4);

        assert_eq!(store.resolve_name(&graph(), "lion").unwrap(), Some(NodeRef::from("D")));
        assert_eq!(store.resolve_name(&graph(), "tiger").unwrap(), None);
        assert_eq!(store.resolve_name(&GraphId::from("other"), "lion").unwrap(), None);
    }

    #[test]
    fn test_add_duplicate_graph_rejected() {
        let store = create_test_store();
        store.add_tree(&graph(), &cats_records()).unwrap();
        let err = store.add_tree(&graph(), &cats_records()).unwrap_err();
        assert!(matches!(err, StorageError::DuplicateGraph(_)));
    }

    #[test]
    fn test_ancestor_chain_nearest_first() {
        let store = create_test_store();
        store.add_tree(&graph(), &cats_records()).unwrap();

        let chain = store.ancestor_chain(&graph(), &NodeRef::from("D")).unwrap();
        assert_eq!(chain, vec![NodeRef::from("B"), NodeRef::from("A")]);

        assert!(store.ancestor_chain(&graph(), &NodeRef::from("A")).unwrap().is_empty());
        assert!(store.ancestor_chain(&graph(), &NodeRef::from("Z")).unwrap().is_empty());
    }

    #[test]
    fn test_ancestor_chain_terminates_on_cycle() {
        let store = create_test_store();
        let records = vec![
            EdgeRecord::new("X").with_parent("Y"),
            EdgeRecord::new("Y").with_parent("X"),
        ];
        store.add_tree(&graph(), &records).unwrap();

        let chain = store.ancestor_chain(&graph(), &NodeRef::from("X")).unwrap();
        assert_eq!(chain.len() as i64, MAX_ANCESTOR_DEPTH);
    }

    #[test]
    fn test_subtree_rows_anchored() {
        let store = create_test_store();
        store.add_tree(&graph(), &cats_records()).unwrap();

        let rows = store.subtree_rows(&graph(), Some(&NodeRef::from("B"))).unwrap();
        let mut nodes: Vec<&str> = rows.iter().map(|r| r.node.as_str()).collect();
        nodes.sort();
        assert_eq!(nodes, vec!["B", "D"]);

        let anchor = rows.iter().find(|r| r.node.as_str() == "B").unwrap();
        assert_eq!(anchor.parent, Some(NodeRef::from("A")));
        assert_eq!(anchor.branch_length, Some(2.0));
    }

    #[test]
    fn test_subtree_rows_whole_graph() {
        let store = create_test_store();
        store.add_tree(&graph(), &cats_records()).unwrap();

        let rows = store.subtree_rows(&graph(), None).unwrap();
        assert_eq!(rows, cats_records());
    }

    #[test]
    fn test_subtree_rows_unknown_graph() {
        let store = create_test_store();
        let err = store.subtree_rows(&graph(), None).unwrap_err();
        assert!(matches!(err, StorageError::GraphNotFound(_)));
    }

    #[test]
    fn test_missing_values_stay_null() {
        let store = create_test_store();
        store
            .add_tree(&graph(), &[EdgeRecord::new("A"), EdgeRecord::new("B").with_parent("A")])
            .unwrap();

        let rows = store.subtree_rows(&graph(), None).unwrap();
        assert_eq!(rows[0].label, None);
        assert_eq!(rows[0].branch_length, None);
        assert_eq!(rows[0].parent, None);
    }

    #[test]
    fn test_synonym_lookup() {
        let store = create_test_store();
        let taxonomy = GraphId::from("http://example.org/felidae_taxonomy/");
        store
            .add_tree(
                &taxonomy,
                &[
                    EdgeRecord::new("t0").with_label("Felidae"),
                    EdgeRecord::new("t1").with_parent("t0").with_label("Panthera leo"),
                ],
            )
            .unwrap();
        let added = store
            .add_synonyms(&taxonomy, &[("Panthera leo".into(), "Felis leo".into()), ("Nope".into(), "x".into())])
            .unwrap();
        assert_eq!(added, 1);

        let found = store.resolve_synonym(&taxonomy, "Felis leo").unwrap().unwrap();
        assert_eq!(found.node, NodeRef::from("t1"));
        assert_eq!(found.canonical_label, "Panthera leo");
        assert!(store.resolve_synonym(&taxonomy, "Panthera leo").unwrap().is_none());
    }

    #[test]
    fn test_add_synonyms_unknown_taxonomy() {
        let store = create_test_store();
        let err = store
            .add_synonyms(&GraphId::from("missing"), &[("a".into(), "b".into())])
            .unwrap_err();
        assert!(matches!(err, StorageError::GraphNotFound(_)));
    }

    #[test]
    fn test_remove_graph_cascades() {
        let store = create_test_store();
        store.add_tree(&graph(), &cats_records()).unwrap();

        assert!(store.remove_graph(&graph()).unwrap());
        assert!(!store.graph_exists(&graph()).unwrap());
        assert!(store.names(None).unwrap().is_empty());
        assert!(!store.remove_graph(&graph()).unwrap());
    }

    #[test]
    fn test_list_graphs_counts_labels() {
        let store = create_test_store();
        store.add_tree(&graph(), &cats_records()).unwrap();
        store
            .add_tree(&GraphId::from("b"), &[EdgeRecord::new("r"), EdgeRecord::new("x").with_parent("r").with_label("x")])
            .unwrap();

        let graphs = store.list_graphs().unwrap();
        assert_eq!(graphs.len(), 2);
        assert_eq!(graphs[0].graph, GraphId::from("b"));
        assert_eq!(graphs[0].taxa, 1);
        assert_eq!(graphs[1].taxa, 4);
    }

    #[test]
    fn test_graphs_containing_ranked() {
        let store = create_test_store();
        store.add_tree(&graph(), &cats_records()).unwrap();
        store
            .add_tree(&GraphId::from("dogs"), &[EdgeRecord::new("r").with_label("dog")])
            .unwrap();

        let labels = vec!["lion".to_string(), "dog".to_string(), "emu".to_string()];
        let ranked = store.graphs_containing(&labels, None).unwrap();
        assert_eq!(
            ranked,
            vec![
                GraphMatch { graph: graph(), matches: 2 },
                GraphMatch { graph: GraphId::from("dogs"), matches: 1 },
            ]
        );
    }

    #[test]
    fn test_graphs_containing_through_synonyms() {
        let store = create_test_store();
        store.add_tree(&graph(), &cats_records()).unwrap();
        let taxonomy = GraphId::from("mammal_taxonomy");
        store
            .add_tree(&taxonomy, &[EdgeRecord::new("t0").with_label("lion")])
            .unwrap();
        store.add_synonyms(&taxonomy, &[("lion".into(), "Felis leo".into())]).unwrap();

        let labels = vec!["Felis leo".to_string()];
        assert!(store.graphs_containing(&labels, None).unwrap().is_empty());

        let ranked = store.graphs_containing(&labels, Some(&taxonomy)).unwrap();
        assert_eq!(ranked.len(), 2);
        // taxonomy graphs sort after trees with the same count
        assert_eq!(ranked[0].graph, graph());
        assert_eq!(ranked[1].graph, taxonomy);
    }

    #[test]
    fn test_graphs_containing_ignores_canonical_to_synonym() {
        let store = create_test_store();
        let old_names = GraphId::from("old_names");
        store
            .add_tree(&old_names, &[EdgeRecord::new("r"), EdgeRecord::new("l").with_parent("r").with_label("Felis leo")])
            .unwrap();
        let taxonomy = GraphId::from("cats_taxonomy");
        store
            .add_tree(&taxonomy, &[EdgeRecord::new("t0").with_label("Panthera leo")])
            .unwrap();
        store.add_synonyms(&taxonomy, &[("Panthera leo".into(), "Felis leo".into())]).unwrap();

        let ranked = store
            .graphs_containing(&["Panthera leo".to_string()], Some(&taxonomy))
            .unwrap();
        assert_eq!(ranked, vec![GraphMatch { graph: taxonomy, matches: 1 }]);
    }

    #[test]
    fn test_graphs_containing_unidentified_species() {
        let store = create_test_store();
        store
            .add_tree(&graph(), &[EdgeRecord::new("r").with_label("Panthera")])
            .unwrap();

        let ranked = store.graphs_containing(&["Panthera sp.".to_string()], None).unwrap();
        assert_eq!(ranked, vec![GraphMatch { graph: graph(), matches: 1 }]);
    }

    #[test]
    fn test_names_sorted_distinct() {
        let store = create_test_store();
        store.add_tree(&graph(), &cats_records()).unwrap();
        store
            .add_tree(&GraphId::from("dogs"), &[EdgeRecord::new("r").with_label("dog")])
            .unwrap();

        assert_eq!(store.names(Some(&graph())).unwrap(), vec!["cat", "dog", "lion", "root"]);
        assert_eq!(store.names(None).unwrap(), vec!["cat", "dog", "lion", "root"]);
    }

    #[test]
    fn test_open_on_disk_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("treestore.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.add_tree(&graph(), &cats_records()).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.resolve_name(&graph(), "dog").unwrap(), Some(NodeRef::from("C")));
    }
}
