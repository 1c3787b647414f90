//! Clone sampling configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CLONES_PER_DIALECT, DEFAULT_EXCLUDED_OWNERS};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CloneConfig {
    /// Clone attempts per dialect. Default: 50.
    pub per_dialect: Option<usize>,
    /// Owners never cloned. Empty = the reactive libraries' own organisations.
    #[serde(default)]
    pub excluded_owners: Vec<String>,
    /// Base URL clone URLs are built from. Default: "https://github.com".
    pub remote_base: Option<String>,
}

impl CloneConfig {
    pub fn effective_per_dialect(&self) -> usize {
        self.per_dialect.unwrap_or(DEFAULT_CLONES_PER_DIALECT)
    }

    pub fn effective_excluded_owners(&self) -> Vec<String> {
        if self.excluded_owners.is_empty() {
            DEFAULT_EXCLUDED_OWNERS.iter().map(|s| s.to_string()).collect()
        } else {
            self.excluded_owners.clone()
        }
    }

    pub fn effective_remote_base(&self) -> &str {
        self.remote_base
            .as_deref()
            .unwrap_or("https://github.com")
            .trim_end_matches('/')
    }
}
