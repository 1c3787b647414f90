//! Index directory naming.

use std::path::{Path, PathBuf};

use rxcensus_core::config::WorkspaceConfig;
use rxcensus_core::types::Dialect;

/// Names of the documents kept in the index directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLayout {
    index_dir: PathBuf,
    catalog: PathBuf,
    allow_list: PathBuf,
}

impl IndexLayout {
    /// Layout with the catalog and allow-list inside `index_dir`.
    pub fn new(index_dir: impl Into<PathBuf>) -> Self {
        let index_dir = index_dir.into();
        Self {
            catalog: index_dir.join("operands.json"),
            allow_list: index_dir.join("allow_list.json"),
            index_dir,
        }
    }

    pub fn from_config(root: &Path, workspace: &WorkspaceConfig) -> Self {
        Self {
            index_dir: workspace.effective_index_dir(root),
            catalog: workspace.effective_catalog_path(root),
            allow_list: workspace.effective_allow_list_path(root),
        }
    }

    pub fn index_dir(&self) -> &Path {
        &self.index_dir
    }

    /// `<index>/<dialect>.txt`
    pub fn file_list(&self, dialect: Dialect) -> PathBuf {
        self.index_dir.join(format!("{}.txt", dialect.name()))
    }

    pub fn catalog(&self) -> &Path {
        &self.catalog
    }

    pub fn allow_list(&self) -> &Path {
        &self.allow_list
    }

    pub fn usage_json(&self) -> PathBuf {
        self.index_dir.join("operands_usage.json")
    }

    pub fn usage_csv(&self) -> PathBuf {
        self.index_dir.join("operands_usage.csv")
    }

    pub fn stats_json(&self) -> PathBuf {
        self.index_dir.join("operands_stats.json")
    }

    pub fn stats_csv(&self) -> PathBuf {
        self.index_dir.join("operands_stats.csv")
    }
}
