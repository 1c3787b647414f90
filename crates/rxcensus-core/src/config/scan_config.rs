//! Scanner configuration.

use serde::{Deserialize, Serialize};

use crate::types::Dialect;

/// Configuration for file listing and matching.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum file size in bytes. Default: 10 MiB.
    pub max_file_size: Option<u64>,
    /// Worker threads. 0 = rayon default.
    pub threads: Option<usize>,
    /// Follow symbolic links while walking clones. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Dialects to process. Empty = all.
    #[serde(default)]
    pub dialects: Vec<Dialect>,
}

impl ScanConfig {
    /// Returns the effective max file size, defaulting to 10 MiB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(10 * 1024 * 1024)
    }

    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    /// The configured dialects in canonical order, or every dialect.
    pub fn effective_dialects(&self) -> Vec<Dialect> {
        if self.dialects.is_empty() {
            return Dialect::ALL.to_vec();
        }
        let mut dialects = self.dialects.clone();
        dialects.sort();
        dialects.dedup();
        dialects
    }
}
