//! Per-dialect file lists: one path per line, relative to the dialect root.

use std::path::Path;

use rustc_hash::FxHashSet;
use rxcensus_analysis::scanner::RepositoryFile;
use rxcensus_core::errors::StorageError;
use rxcensus_core::types::Dialect;

use crate::json::{read_text, write_text};

/// Replace the list at `path`. Re-running with the same files is a no-op.
pub fn write_file_list(path: &Path, files: &[RepositoryFile]) -> Result<(), StorageError> {
    let mut text = String::new();
    for file in files {
        text.push_str(file.relative());
        text.push('\n');
    }
    write_text(path, &text)?;
    tracing::debug!(path = %path.display(), files = files.len(), "file list written");
    Ok(())
}

/// Load a list, dropping duplicate entries and blank lines.
///
/// Entries are checked against the dialect again: a line that is not an
/// in-scope file for `dialect` is an error.
pub fn load_file_list(
    path: &Path,
    dialect_root: &Path,
    dialect: Dialect,
) -> Result<Vec<RepositoryFile>, StorageError> {
    let text = read_text(path)?;
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut files = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let entry = line.trim();
        if entry.is_empty() {
            continue;
        }
        let file = RepositoryFile::from_relative(dialect_root, dialect, entry).ok_or_else(|| {
            StorageError::FileList {
                path: path.to_path_buf(),
                line: index + 1,
                message: format!("'{entry}' is not an in-scope {dialect} source file"),
            }
        })?;
        if seen.insert(file.relative().to_string()) {
            files.push(file);
        }
    }

    if files.len() < text.lines().filter(|l| !l.trim().is_empty()).count() {
        tracing::debug!(path = %path.display(), "duplicate file list entries dropped");
    }
    Ok(files)
}
