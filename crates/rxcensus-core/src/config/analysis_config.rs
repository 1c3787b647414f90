//! Aggregation and statistics configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Aggregate with one worker per dialect. Default: true.
    pub parallel: Option<bool>,
    /// Give allow-listed repositories without matching files explicit zero
    /// cells before computing statistics. Default: false.
    pub backfill_allow_list: Option<bool>,
}

impl AnalysisConfig {
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(true)
    }

    pub fn effective_backfill_allow_list(&self) -> bool {
        self.backfill_allow_list.unwrap_or(false)
    }
}
