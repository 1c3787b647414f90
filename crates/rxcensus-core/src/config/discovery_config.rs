//! Repository discovery configuration.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::Dialect;

/// Configuration for the hosted repository search.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// API base URL. Default: "https://api.github.com".
    pub api_base: Option<String>,
    /// File holding the access token; `GITHUB_TOKEN` takes precedence.
    pub token_path: Option<PathBuf>,
    /// Lowest star count searched. Default: 10.
    pub min_stars: Option<u64>,
    /// Highest star count searched. Default: 1_000_000.
    pub max_stars: Option<u64>,
    /// How far each exhausted window steps down. Default: 10.
    pub window_step: Option<u64>,
    /// Longest single sleep while waiting on the rate budget. Default: 60.
    pub poll_interval_secs: Option<u64>,
    /// Total time to wait for one budget reset before failing. Default: 3900.
    pub max_wait_secs: Option<u64>,
    /// Retries for transient HTTP failures. Default: 3.
    pub max_retries: Option<u32>,
    /// Per-dialect search query, keyed by dialect name. Default: the dialect name.
    #[serde(default)]
    pub queries: BTreeMap<String, String>,
}

impl DiscoveryConfig {
    pub fn effective_api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or("https://api.github.com")
    }

    pub fn effective_min_stars(&self) -> u64 {
        self.min_stars.unwrap_or(10)
    }

    pub fn effective_max_stars(&self) -> u64 {
        self.max_stars.unwrap_or(1_000_000)
    }

    pub fn effective_window_step(&self) -> u64 {
        self.window_step.unwrap_or(10)
    }

    pub fn effective_poll_interval_secs(&self) -> u64 {
        self.poll_interval_secs.unwrap_or(60)
    }

    /// Default covers one full hourly reset plus slack.
    pub fn effective_max_wait_secs(&self) -> u64 {
        self.max_wait_secs.unwrap_or(3900)
    }

    pub fn effective_max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(3)
    }

    pub fn query_for(&self, dialect: Dialect) -> String {
        self.queries
            .get(dialect.name())
            .cloned()
            .unwrap_or_else(|| dialect.name().to_string())
    }
}
