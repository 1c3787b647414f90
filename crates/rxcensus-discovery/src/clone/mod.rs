//! Bounded per-dialect cloning and allow-list generation.

mod git;

pub use git::Git2Cloner;

use std::path::{Path, PathBuf};

use rxcensus_core::config::CloneConfig;
use rxcensus_core::errors::CloneError;
use rxcensus_core::types::{AllowList, Dialect, RepositoryId};

use crate::manifest::RepositoryManifest;

/// Fetches one repository into a directory.
pub trait Cloner {
    fn clone_repo(&self, url: &str, target: &Path) -> Result<(), CloneError>;
}

/// One repository to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneTarget {
    pub repository: RepositoryId,
    pub url: String,
    pub path: PathBuf,
}

/// The sample of repositories to clone for one dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClonePlan {
    pub dialect: Dialect,
    pub targets: Vec<CloneTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneReport {
    pub cloned: Vec<RepositoryId>,
    pub skipped_existing: Vec<RepositoryId>,
    pub failed: Vec<(RepositoryId, String)>,
}

impl CloneReport {
    /// Targets that used a slot of the sample.
    pub fn attempted(&self) -> usize {
        self.cloned.len() + self.skipped_existing.len() + self.failed.len()
    }
}

impl ClonePlan {
    /// The `per_dialect` most-starred repositories of `manifest` whose owner
    /// is not excluded, targeted at `clones_root/<dialect>/<owner>_<name>`.
    pub fn build(manifest: &RepositoryManifest, config: &CloneConfig, clones_root: &Path) -> Self {
        let excluded = config.effective_excluded_owners();
        let remote_base = config.effective_remote_base();
        let dialect_root = clones_root.join(manifest.dialect.name());

        let targets = manifest
            .by_stars()
            .into_iter()
            .filter(|record| {
                let skip = excluded.iter().any(|owner| *owner == record.owner);
                if skip {
                    tracing::debug!(repository = %record.full_name, "owner excluded");
                }
                !skip
            })
            .take(config.effective_per_dialect())
            .map(|record| {
                let repository = record.repository_id();
                CloneTarget {
                    url: format!("{remote_base}/{}.git", record.full_name),
                    path: dialect_root.join(repository.as_str()),
                    repository,
                }
            })
            .collect();

        Self {
            dialect: manifest.dialect,
            targets,
        }
    }

    /// Clone every target not already on disk. Failures are recorded, never
    /// returned, and leave no partial directory behind.
    pub fn execute(&self, cloner: &dyn Cloner) -> CloneReport {
        let mut report = CloneReport::default();
        for target in &self.targets {
            if target.path.exists() {
                tracing::debug!(repository = %target.repository, "already cloned");
                report.skipped_existing.push(target.repository.clone());
                continue;
            }

            match cloner.clone_repo(&target.url, &target.path) {
                Ok(()) => {
                    tracing::info!(dialect = %self.dialect, repository = %target.repository, "cloned");
                    report.cloned.push(target.repository.clone());
                }
                Err(e) => {
                    tracing::warn!(dialect = %self.dialect, repository = %target.repository, error = %e, "clone failed");
                    if target.path.exists() {
                        if let Err(rm) = std::fs::remove_dir_all(&target.path) {
                            tracing::warn!(path = %target.path.display(), error = %rm, "could not remove partial clone");
                        }
                    }
                    report.failed.push((target.repository.clone(), e.to_string()));
                }
            }
        }
        report
    }
}

/// Allow-list of every repository directory present under each dialect root.
///
/// Every requested dialect is registered, even when its root is missing.
/// Hidden directories are ignored.
pub fn allow_list_from_clones(clones_root: &Path, dialects: &[Dialect]) -> Result<AllowList, CloneError> {
    let mut list = AllowList::new();
    for &dialect in dialects {
        list.register(dialect);
        let dialect_root = clones_root.join(dialect.name());
        if !dialect_root.is_dir() {
            tracing::warn!(dialect = %dialect, root = %dialect_root.display(), "no clones for dialect");
            continue;
        }

        let io_err = |source| CloneError::Io {
            path: dialect_root.clone(),
            source,
        };
        for entry in std::fs::read_dir(&dialect_root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            list.insert(dialect, RepositoryId::new(name));
        }
        tracing::info!(dialect = %dialect, repositories = list.len_for(dialect), "allow-list built");
    }
    Ok(list)
}
