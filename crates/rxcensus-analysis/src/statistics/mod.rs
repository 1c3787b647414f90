//! Descriptive statistics over the usage table.

pub mod engine;
pub mod record;

pub use engine::{RankBy, StatisticsEngine, StatisticsTable};
pub use record::{ModeValue, StatisticsRecord};
