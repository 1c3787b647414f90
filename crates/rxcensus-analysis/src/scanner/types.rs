//! Scanner types.

use std::path::{Path, PathBuf};

use rxcensus_core::types::{Dialect, RepositoryId};

/// One in-scope source file.
///
/// Only constructible through [`RepositoryFile::from_relative`], which checks
/// the dialect's extension and path rule, so every value is in scope.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RepositoryFile {
    dialect: Dialect,
    repository: RepositoryId,
    relative: String,
    path: PathBuf,
}

impl RepositoryFile {
    /// Build a file from its path relative to the dialect root.
    ///
    /// Either separator is accepted; the stored relative path uses `/`.
    /// Returns `None` when the path has no repository segment, has the wrong
    /// extension, or fails the dialect's path rule.
    pub fn from_relative(dialect_root: &Path, dialect: Dialect, relative: &str) -> Option<Self> {
        let normalized = normalize(relative);
        let (repository, rest) = normalized.split_once('/')?;
        if repository.is_empty() || rest.is_empty() {
            return None;
        }

        let file_name = rest.rsplit('/').next()?;
        let (_, extension) = file_name.rsplit_once('.')?;
        if !dialect.accepts_extension(extension) {
            return None;
        }
        if !dialect.path_rule().matches(Path::new(&normalized)) {
            return None;
        }

        Some(Self {
            dialect,
            repository: RepositoryId::new(repository),
            path: dialect_root.join(&normalized),
            relative: normalized,
        })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn repository(&self) -> &RepositoryId {
        &self.repository
    }

    /// Path relative to the dialect root, `/`-separated.
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// Location on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn normalize(relative: &str) -> String {
    let unified = relative.trim().replace('\\', "/");
    unified
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_is_first_segment() {
        let file = RepositoryFile::from_relative(
            Path::new("/clones/rxjava"),
            Dialect::RxJava,
            "acme_app/src/main/java/com/acme/App.java",
        )
        .unwrap();
        assert_eq!(file.repository().as_str(), "acme_app");
        assert_eq!(
            file.path(),
            Path::new("/clones/rxjava/acme_app/src/main/java/com/acme/App.java")
        );
    }

    #[test]
    fn test_windows_list_entries_normalized() {
        let file = RepositoryFile::from_relative(
            Path::new("repos/rxjs"),
            Dialect::RxJs,
            r".\acme_web\src\app.ts",
        )
        .unwrap();
        assert_eq!(file.relative(), "acme_web/src/app.ts");
    }

    #[test]
    fn test_rejects_out_of_scope_paths() {
        let root = Path::new("repos");
        assert!(RepositoryFile::from_relative(root, Dialect::RxJava, "App.java").is_none());
        assert!(RepositoryFile::from_relative(root, Dialect::RxJava, "r/src/test/java/A.java")
            .is_none());
        assert!(RepositoryFile::from_relative(root, Dialect::RxSwift, "r/Sources/A.kt").is_none());
        assert!(RepositoryFile::from_relative(root, Dialect::RxDart, "r/lib/README").is_none());
    }

    #[test]
    fn test_kotlin_accepts_java_in_kotlin_subtree() {
        let root = Path::new("repos/rxkotlin");
        assert!(
            RepositoryFile::from_relative(root, Dialect::RxKotlin, "r/src/main/kotlin/A.java")
                .is_some()
        );
        assert!(
            RepositoryFile::from_relative(root, Dialect::RxKotlin, "r/src/main/java/A.kt")
                .is_none()
        );
    }
}
