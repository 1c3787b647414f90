//! Source text loading.

use std::io;

use crate::scanner::RepositoryFile;

/// Supplies the raw bytes of a file to the aggregator.
pub trait SourceLoader: Sync {
    fn load(&self, file: &RepositoryFile) -> io::Result<Vec<u8>>;
}

/// Reads files whole from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl SourceLoader for FsLoader {
    fn load(&self, file: &RepositoryFile) -> io::Result<Vec<u8>> {
        std::fs::read(file.path())
    }
}
