//! rxcensus-analysis: the operator-usage extraction and aggregation engine.
//!
//! Pipeline: clones → `scanner` (file lists) → `engine` (per-file operator
//! counts) → `aggregation` (usage table) → `statistics` (per-operator metrics).

pub mod aggregation;
pub mod engine;
pub mod scanner;
pub mod statistics;

pub use aggregation::{ExecutionMode, UsageAggregator};
pub use engine::{OperatorCounts, OperatorMatcher};
pub use scanner::{FileClassifier, RepositoryFile};
pub use statistics::{ModeValue, RankBy, StatisticsEngine, StatisticsRecord, StatisticsTable};
