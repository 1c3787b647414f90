//! Storage errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

/// Errors reading or writing index documents.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {message}")]
    Json { path: PathBuf, message: String },

    #[error("Invalid file list entry in {path} line {line}: {message}")]
    FileList {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_ERROR
    }
}
