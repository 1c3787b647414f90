//! Dialect-aware operator matcher.

use std::collections::{BTreeMap, BTreeSet};

use rxcensus_core::errors::CatalogError;
use rxcensus_core::types::{Dialect, MatchStrategy};

use super::direct::DirectStrategy;
use super::pipeline::PipelineStrategy;

/// Operator → occurrences in one text. Every catalogued operator is present.
pub type OperatorCounts = BTreeMap<String, u64>;

/// A way of counting operator uses in source text.
pub trait CountStrategy: Send + Sync {
    /// Counts for every operator this strategy was built with, zero included.
    fn count(&self, text: &str) -> OperatorCounts;

    fn operators(&self) -> Vec<&str>;
}

/// Counts one dialect's catalogued operators in a file's text, using the
/// strategy the dialect's call syntax requires.
pub struct OperatorMatcher {
    dialect: Dialect,
    strategy: Box<dyn CountStrategy>,
}

impl std::fmt::Debug for OperatorMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorMatcher")
            .field("dialect", &self.dialect)
            .field("operators", &self.strategy.operators())
            .finish()
    }
}

impl OperatorMatcher {
    pub fn new(dialect: Dialect, operators: &BTreeSet<String>) -> Result<Self, CatalogError> {
        let strategy: Box<dyn CountStrategy> = match dialect.strategy() {
            MatchStrategy::Direct => Box::new(DirectStrategy::new(operators)?),
            MatchStrategy::Pipeline => Box::new(PipelineStrategy::new(operators)),
        };
        Ok(Self { dialect, strategy })
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn count_text(&self, text: &str) -> OperatorCounts {
        self.strategy.count(text)
    }

    /// Invalid UTF-8 is replaced, never rejected.
    pub fn count_bytes(&self, bytes: &[u8]) -> OperatorCounts {
        self.strategy.count(&String::from_utf8_lossy(bytes))
    }

    pub fn zero_counts(&self) -> OperatorCounts {
        self.strategy
            .operators()
            .into_iter()
            .map(|op| (op.to_string(), 0))
            .collect()
    }
}
