//! Aggregation: per-file counts folded into a per-repository usage table.

pub mod aggregator;
pub mod loader;

pub use aggregator::{AggregationSummary, ExecutionMode, UsageAggregator};
pub use loader::{FsLoader, SourceLoader};
