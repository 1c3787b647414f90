//! Clone errors.

use std::path::PathBuf;

use super::error_code::{self, ErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum CloneError {
    #[error("Clone of {url} into {target} failed: {message}")]
    Failed {
        url: String,
        target: PathBuf,
        message: String,
    },

    #[error("IO error preparing {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl ErrorCode for CloneError {
    fn error_code(&self) -> &'static str {
        error_code::CLONE_ERROR
    }
}
