//! Discovered repositories, persisted per dialect.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use rxcensus_core::errors::StorageError;
use rxcensus_core::types::{Dialect, RepositoryId};
use rxcensus_storage::json::{read_json, write_json};

/// One repository returned by the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRecord {
    pub id: u64,
    pub full_name: String,
    pub owner: String,
    pub name: String,
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub language: Option<String>,
    /// Size in KiB as reported by the API.
    #[serde(default)]
    pub size: u64,
}

impl RepositoryRecord {
    /// The identifier of this repository's clone directory.
    pub fn repository_id(&self) -> RepositoryId {
        RepositoryId::from_owner_and_name(&self.owner, &self.name)
    }
}

/// The repositories discovered for one dialect, in discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryManifest {
    pub dialect: Dialect,
    pub query: String,
    pub repositories: Vec<RepositoryRecord>,
}

impl RepositoryManifest {
    /// `<manifests>/<dialect>.json`
    pub fn path_in(manifests_dir: &Path, dialect: Dialect) -> PathBuf {
        manifests_dir.join(format!("{}.json", dialect.name()))
    }

    pub fn load(manifests_dir: &Path, dialect: Dialect) -> Result<Self, StorageError> {
        let path = Self::path_in(manifests_dir, dialect);
        let manifest: Self = read_json(&path)?;
        if manifest.dialect != dialect {
            return Err(StorageError::Json {
                path,
                message: format!(
                    "manifest is for {}, expected {dialect}",
                    manifest.dialect
                ),
            });
        }
        Ok(manifest)
    }

    pub fn save(&self, manifests_dir: &Path) -> Result<PathBuf, StorageError> {
        let path = Self::path_in(manifests_dir, self.dialect);
        write_json(&path, self)?;
        Ok(path)
    }

    /// Records ordered by stars, most first. Equal stars keep discovery order.
    pub fn by_stars(&self) -> Vec<&RepositoryRecord> {
        let mut records: Vec<&RepositoryRecord> = self.repositories.iter().collect();
        records.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
        records
    }
}
