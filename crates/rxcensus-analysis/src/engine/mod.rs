//! Operator matching: per-file occurrence counts for a dialect's catalog.
//!
//! Two strategies share the [`CountStrategy`] seam:
//! - `direct`: `receiver.operator(args)` call sites
//! - `pipeline`: the first call after each `pipe(` anchor

pub mod direct;
pub mod matcher;
pub mod pipeline;

pub use direct::DirectStrategy;
pub use matcher::{CountStrategy, OperatorCounts, OperatorMatcher};
pub use pipeline::PipelineStrategy;
