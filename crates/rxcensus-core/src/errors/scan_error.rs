//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors that can occur while listing files.
///
/// Reading a listed file never produces one of these: unreadable files are
/// downgraded to zero counts at the point of access.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Dialect root does not exist: {path}")]
    MissingRoot { path: PathBuf },

    #[error("IO error scanning {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Worker pool could not be built: {0}")]
    ThreadPool(String),
}

impl ErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        error_code::SCAN_ERROR
    }
}
