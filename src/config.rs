//! Treestore configuration
//!
//! Read from `<config_dir>/treestore/config.yaml`. The loaded value is
//! passed explicitly to whoever needs it; nothing here is global.

use crate::graph::GraphId;
use crate::query::{BranchLengthDefault, CollapseLengths};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_BASE_URI: &str = "http://phylotastic.org/treestore/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreestoreConfig {
    /// SQLite database file
    pub db_path: PathBuf,
    /// Prefix turning short tree ids into graph URIs
    pub base_uri: String,
    /// Length given to edges stored without one
    pub default_branch_length: BranchLengthDefault,
    /// What pruning does with the length of a collapsed edge
    pub collapse_lengths: CollapseLengths,
}

impl Default for TreestoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            base_uri: DEFAULT_BASE_URI.to_string(),
            default_branch_length: BranchLengthDefault::default(),
            collapse_lengths: CollapseLengths::default(),
        }
    }
}

impl TreestoreConfig {
    /// Load from the default location, writing defaults there if missing
    pub fn load_or_init() -> ConfigResult<Self> {
        Self::load_or_init_at(default_config_path())
    }

    pub fn load_or_init_at(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            return Self::load(path);
        }
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Full graph URI for a tree id; ids that already are URIs pass through
    pub fn uri_from_id(&self, id: &str) -> GraphId {
        if id.contains("://") {
            return GraphId::from(id);
        }
        let mut uri = self.base_uri.clone();
        if !uri.ends_with('/') {
            uri.push('/');
        }
        uri.push_str(id.trim_start_matches('/'));
        if !uri.ends_with('/') {
            uri.push('/');
        }
        GraphId::from(uri)
    }

    /// Short id for a graph URI under `base_uri`
    pub fn id_from_uri(&self, graph: &GraphId) -> String {
        match graph.as_str().strip_prefix(&self.base_uri) {
            Some(rest) => rest.trim_end_matches('/').to_string(),
            None => graph.to_string(),
        }
    }
}

/// `~/.config/treestore/config.yaml` or the platform equivalent
pub fn default_config_path() -> PathBuf {
    let config_dir = dirs::config_dir().unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".config"));
    config_dir.join("treestore").join("config.yaml")
}

/// `~/.local/share/treestore/treestore.db` or the platform equivalent
pub fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir().unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("treestore").join("treestore.db")
}
