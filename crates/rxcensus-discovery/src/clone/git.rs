use std::path::Path;

use rxcensus_core::errors::CloneError;

use super::Cloner;

/// Full clones through libgit2.
#[derive(Debug, Clone, Copy, Default)]
pub struct Git2Cloner;

impl Cloner for Git2Cloner {
    fn clone_repo(&self, url: &str, target: &Path) -> Result<(), CloneError> {
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CloneError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        git2::build::RepoBuilder::new()
            .clone(url, target)
            .map(|_| ())
            .map_err(|e| CloneError::Failed {
                url: url.to_string(),
                target: target.to_path_buf(),
                message: e.message().to_string(),
            })
    }
}
