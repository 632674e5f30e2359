//! Treestore CLI: load trees and query minimal subtrees from them.
//!
//! Usage:
//!   treestore add <file> [uri]
//!   treestore query <taxa> [uri] [--complete] [--taxonomy uri]
//!   treestore ls [taxa] [--counts]

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::Level;
use treestore::newick::{parse_newick, to_newick};
use treestore::{
    get_tree, GraphId, OpenStore, SqliteStore, SubtreeQuery, TreeStore, TreestoreConfig,
};

#[derive(Parser)]
#[command(
    name = "treestore",
    version,
    about = "Phylogenetic tree store with minimal subtree queries"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Base URI for short tree ids
    #[arg(long, global = true)]
    base_uri: Option<String>,
    /// Log resolution and reconstruction details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add the trees of a Newick file
    Add {
        /// Newick tree file
        file: PathBuf,
        /// Tree uri (default: file name)
        uri: Option<String>,
    },
    /// Attach synonyms to a taxonomy graph
    Synonyms {
        /// Taxonomy graph uri
        uri: String,
        /// Tab-separated `canonical<TAB>synonym` lines
        file: PathBuf,
    },
    /// Retrieve a whole tree as Newick
    Get {
        /// Tree uri
        uri: String,
    },
    /// Remove a tree
    Rm {
        /// Tree uri
        uri: String,
    },
    /// List trees, or the trees containing some of a set of taxa
    Ls {
        /// Comma-delimited list of desired taxa
        contains: Option<String>,
        /// Show the number of matched taxa next to each tree
        #[arg(long)]
        counts: bool,
        /// One per line, ids only
        #[arg(short = 'l')]
        lines: bool,
        /// Show full URIs instead of ids
        #[arg(short = 'f')]
        full: bool,
        /// Taxonomy graph used for synonym matching
        #[arg(long)]
        taxonomy: Option<String>,
    },
    /// List the taxon names of a tree (default: all trees)
    Names {
        uri: Option<String>,
        #[arg(short, long, value_enum, default_value = "csv")]
        format: NamesFormat,
    },
    /// Count the distinct taxon names of a tree (default: all trees)
    Count { uri: Option<String> },
    /// Retrieve the minimal subtree containing a set of taxa
    Query {
        /// Comma-delimited list of desired taxa
        contains: String,
        /// Tree uri (default: select automatically)
        uri: Option<String>,
        /// Return the complete subtree below the MRCA without pruning
        #[arg(long)]
        complete: bool,
        /// Taxonomy graph used for synonym lookup
        #[arg(long)]
        taxonomy: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NamesFormat {
    Csv,
    Json,
    Lines,
}

fn split_taxa(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn open_store(config: &TreestoreConfig) -> Result<SqliteStore, String> {
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    SqliteStore::open(&config.db_path).map_err(|e| format!("Failed to open database: {}", e))
}

fn cmd_add(store: &SqliteStore, config: &TreestoreConfig, file: &Path, uri: Option<&str>) -> i32 {
    let text = match std::fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", file.display(), e);
            return 1;
        }
    };
    let trees = match parse_newick(&text) {
        Ok(trees) => trees,
        Err(e) => {
            eprintln!("Error: {}: {}", file.display(), e);
            return 1;
        }
    };

    let id = match uri {
        Some(uri) => uri.to_string(),
        None => file
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default(),
    };
    let graph = config.uri_from_id(&id);
    if trees.len() > 1 {
        eprintln!("Warning: {} holds {} trees; only the first is stored", file.display(), trees.len());
    }

    let records = trees[0].to_records(&graph);
    match store.add_tree(&graph, &records) {
        Ok(count) => {
            println!("Added {} ({} nodes)", config.id_from_uri(&graph), count);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_synonyms(store: &SqliteStore, config: &TreestoreConfig, uri: &str, file: &Path) -> i32 {
    let text = match std::fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", file.display(), e);
            return 1;
        }
    };
    let pairs: Vec<(String, String)> = text
        .lines()
        .filter_map(|line| {
            let (canonical, synonym) = line.split_once('\t')?;
            let (canonical, synonym) = (canonical.trim(), synonym.trim());
            (!canonical.is_empty() && !synonym.is_empty())
                .then(|| (canonical.to_string(), synonym.to_string()))
        })
        .collect();

    let graph = config.uri_from_id(uri);
    match store.add_synonyms(&graph, &pairs) {
        Ok(count) => {
            println!("Added {} of {} synonyms to {}", count, pairs.len(), config.id_from_uri(&graph));
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_get(store: &SqliteStore, config: &TreestoreConfig, uri: &str) -> i32 {
    let graph = config.uri_from_id(uri);
    match get_tree(store, &graph, config.default_branch_length) {
        Ok(tree) => {
            println!("{}", to_newick(&tree));
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_rm(store: &SqliteStore, config: &TreestoreConfig, uri: &str) -> i32 {
    let graph = config.uri_from_id(uri);
    match store.remove_graph(&graph) {
        Ok(true) => {
            println!("Removed {}", config.id_from_uri(&graph));
            0
        }
        Ok(false) => {
            eprintln!("Error: tree '{}' not found", uri);
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn display_id(config: &TreestoreConfig, graph: &GraphId, full: bool) -> String {
    if full {
        graph.to_string()
    } else {
        config.id_from_uri(graph)
    }
}

fn cmd_ls_all(store: &SqliteStore, config: &TreestoreConfig, lines: bool, full: bool) -> i32 {
    let graphs = match store.list_graphs() {
        Ok(graphs) => graphs,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if lines {
        for summary in &graphs {
            println!("{}", display_id(config, &summary.graph, full));
        }
        return 0;
    }
    if graphs.is_empty() {
        println!("No trees stored.");
        return 0;
    }
    println!("{:<40}  {:>7}  {:<20}", "TREE", "TAXA", "LOADED");
    println!("{}", "-".repeat(71));
    for summary in graphs {
        println!(
            "{:<40}  {:>7}  {:<20}",
            display_id(config, &summary.graph, full),
            summary.taxa,
            summary.loaded_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    0
}

fn cmd_ls_containing(
    store: &SqliteStore,
    config: &TreestoreConfig,
    contains: &str,
    counts: bool,
    full: bool,
    taxonomy: Option<&str>,
) -> i32 {
    let taxa = split_taxa(contains);
    let taxonomy = taxonomy.map(|t| config.uri_from_id(t));
    match store.graphs_containing(&taxa, taxonomy.as_ref()) {
        Ok(matches) => {
            for m in matches {
                let id = display_id(config, &m.graph, full);
                if counts {
                    println!("{} ({})", id, m.matches);
                } else {
                    println!("{}", id);
                }
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_names(store: &SqliteStore, config: &TreestoreConfig, uri: Option<&str>, format: NamesFormat) -> i32 {
    let graph = uri.map(|u| config.uri_from_id(u));
    let names = match store.names(graph.as_ref()) {
        Ok(names) => names,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match format {
        NamesFormat::Csv => println!("{}", names.join(",")),
        NamesFormat::Lines => {
            for name in &names {
                println!("{}", name);
            }
        }
        NamesFormat::Json => {
            let body = serde_json::json!({
                "names": names.iter().map(|name| serde_json::json!({ "name": name })).collect::<Vec<_>>(),
            });
            match serde_json::to_string_pretty(&body) {
                Ok(json) => println!("{}", json),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return 1;
                }
            }
        }
    }
    0
}

fn cmd_count(store: &SqliteStore, config: &TreestoreConfig, uri: Option<&str>) -> i32 {
    let graph = uri.map(|u| config.uri_from_id(u));
    match store.names(graph.as_ref()) {
        Ok(names) => {
            println!("{}", names.len());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_query(
    store: &SqliteStore,
    config: &TreestoreConfig,
    contains: &str,
    uri: Option<&str>,
    complete: bool,
    taxonomy: Option<&str>,
) -> i32 {
    let mut query = SubtreeQuery::new(split_taxa(contains))
        .complete(complete)
        .branch_lengths(config.default_branch_length)
        .collapse(config.collapse_lengths);
    if let Some(uri) = uri {
        query = query.in_graph(config.uri_from_id(uri));
    }
    if let Some(taxonomy) = taxonomy {
        query = query.with_taxonomy(config.uri_from_id(taxonomy));
    }

    match query.execute(store) {
        Ok(result) => {
            let dropped = result.mrca.dropped();
            if !dropped.is_empty() {
                eprintln!("Warning: not found in {}: {}", config.id_from_uri(&result.graph), dropped.join(", "));
            }
            println!("{}", to_newick(&result.tree));
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match TreestoreConfig::load_or_init() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load config: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(db) = cli.db {
        config.db_path = db;
    }
    if let Some(base_uri) = cli.base_uri {
        config.base_uri = base_uri;
    }

    let store = match open_store(&config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Add { file, uri } => cmd_add(&store, &config, &file, uri.as_deref()),
        Commands::Synonyms { uri, file } => cmd_synonyms(&store, &config, &uri, &file),
        Commands::Get { uri } => cmd_get(&store, &config, &uri),
        Commands::Rm { uri } => cmd_rm(&store, &config, &uri),
        Commands::Ls { contains: None, lines, full, .. } => cmd_ls_all(&store, &config, lines, full),
        Commands::Ls { contains: Some(contains), counts, full, taxonomy, .. } => {
            cmd_ls_containing(&store, &config, &contains, counts, full, taxonomy.as_deref())
        }
        Commands::Names { uri, format } => cmd_names(&store, &config, uri.as_deref(), format),
        Commands::Count { uri } => cmd_count(&store, &config, uri.as_deref()),
        Commands::Query { contains, uri, complete, taxonomy } => {
            cmd_query(&store, &config, &contains, uri.as_deref(), complete, taxonomy.as_deref())
        }
    };
    std::process::exit(code);
}
