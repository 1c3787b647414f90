//! File classification over the cloned trees, using `ignore` for the walk.

use std::collections::BTreeMap;
use std::path::{Component, Path};

use ignore::{DirEntry, WalkBuilder};
use rayon::prelude::*;
use rxcensus_core::config::ScanConfig;
use rxcensus_core::errors::ScanError;
use rxcensus_core::types::Dialect;

use super::types::RepositoryFile;

/// Directories holding version-control metadata, never source.
const VCS_DIRS: &[&str] = &[".git", ".hg", ".svn"];

/// Decides which files under a dialect root are in scope.
///
/// Stateless between calls: every `classify` walks the tree afresh.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    max_file_size: u64,
    follow_symlinks: bool,
}

impl Default for FileClassifier {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default())
    }
}

impl FileClassifier {
    pub fn new(max_file_size: u64, follow_symlinks: bool) -> Self {
        Self {
            max_file_size,
            follow_symlinks,
        }
    }

    pub fn from_config(config: &ScanConfig) -> Self {
        Self::new(
            config.effective_max_file_size(),
            config.effective_follow_symlinks(),
        )
    }

    /// Lazily yield the in-scope files under `dialect_root`, whose immediate
    /// children are the cloned repositories.
    ///
    /// Nothing on disk is modified. Entries the walker cannot read are logged
    /// and skipped.
    pub fn classify<'a>(
        &'a self,
        dialect_root: &'a Path,
        dialect: Dialect,
    ) -> Result<impl Iterator<Item = RepositoryFile> + 'a, ScanError> {
        if !dialect_root.is_dir() {
            return Err(ScanError::MissingRoot {
                path: dialect_root.to_path_buf(),
            });
        }

        let walker = WalkBuilder::new(dialect_root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(self.follow_symlinks)
            .filter_entry(|entry| !is_vcs_dir(entry))
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        Ok(walker.filter_map(move |result| {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(root = %dialect_root.display(), error = %e, "walk error");
                    return None;
                }
            };
            self.accept(dialect_root, dialect, &entry)
        }))
    }

    /// Classify `clones_root/<dialect>` for each dialect, one worker per dialect.
    ///
    /// Dialects without a clone directory yield an empty list.
    pub fn classify_all(
        &self,
        clones_root: &Path,
        dialects: &[Dialect],
    ) -> Result<BTreeMap<Dialect, Vec<RepositoryFile>>, ScanError> {
        dialects
            .par_iter()
            .map(|&dialect| {
                let root = clones_root.join(dialect.name());
                if !root.is_dir() {
                    tracing::warn!(%dialect, root = %root.display(), "no clones for dialect");
                    return Ok((dialect, Vec::new()));
                }
                let files: Vec<RepositoryFile> = self.classify(&root, dialect)?.collect();
                tracing::info!(%dialect, files = files.len(), "classified files");
                Ok((dialect, files))
            })
            .collect()
    }

    fn accept(&self, root: &Path, dialect: Dialect, entry: &DirEntry) -> Option<RepositoryFile> {
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            return None;
        }
        // Depth 1 is the dialect root's own files: no repository segment.
        if entry.depth() < 2 {
            return None;
        }

        let relative = relative_slash_path(root, entry.path())?;
        let file = RepositoryFile::from_relative(root, dialect, &relative)?;

        match entry.metadata() {
            Ok(meta) if meta.len() > self.max_file_size => {
                tracing::debug!(path = %relative, size = meta.len(), "skipping oversized file");
                None
            }
            Ok(_) => Some(file),
            Err(e) => {
                tracing::debug!(path = %relative, error = %e, "cannot stat file");
                None
            }
        }
    }
}

fn is_vcs_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_dir())
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| VCS_DIRS.contains(&name))
}

fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let segments: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    Some(segments.join("/"))
}
