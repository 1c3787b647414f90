//! Working-root directory layout.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Where clones, indexes and manifests live, relative to the working root
/// unless given as absolute paths.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Root of the cloned trees, one subdirectory per dialect. Default: "repos".
    pub clones_dir: Option<PathBuf>,
    /// File lists and exported tables. Default: "indexes".
    pub index_dir: Option<PathBuf>,
    /// Discovered repository manifests. Default: "manifests".
    pub manifests_dir: Option<PathBuf>,
    /// Operator catalog. Default: "indexes/operands.json".
    pub catalog_path: Option<PathBuf>,
    /// Allow-list. Default: "indexes/allow_list.json".
    pub allow_list_path: Option<PathBuf>,
}

impl WorkspaceConfig {
    pub fn effective_clones_dir(&self, root: &Path) -> PathBuf {
        resolve(root, self.clones_dir.as_deref(), "repos")
    }

    pub fn effective_index_dir(&self, root: &Path) -> PathBuf {
        resolve(root, self.index_dir.as_deref(), "indexes")
    }

    pub fn effective_manifests_dir(&self, root: &Path) -> PathBuf {
        resolve(root, self.manifests_dir.as_deref(), "manifests")
    }

    pub fn effective_catalog_path(&self, root: &Path) -> PathBuf {
        resolve(root, self.catalog_path.as_deref(), "indexes/operands.json")
    }

    pub fn effective_allow_list_path(&self, root: &Path) -> PathBuf {
        resolve(root, self.allow_list_path.as_deref(), "indexes/allow_list.json")
    }
}

fn resolve(root: &Path, configured: Option<&Path>, default: &str) -> PathBuf {
    // `join` keeps absolute configured paths as they are.
    root.join(configured.unwrap_or_else(|| Path::new(default)))
}
