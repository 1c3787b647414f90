//! The statistics engine.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use rxcensus_core::types::{Dialect, UsageTable};

use super::record::StatisticsRecord;

/// Dialect → operator → metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticsTable {
    records: BTreeMap<Dialect, BTreeMap<String, StatisticsRecord>>,
}

/// Ordering key for [`StatisticsTable::ranked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBy {
    Coverage,
    TotalUses,
}

impl StatisticsTable {
    pub fn get(&self, dialect: Dialect, operator: &str) -> Option<&StatisticsRecord> {
        self.records.get(&dialect)?.get(operator)
    }

    pub fn dialects(&self) -> impl Iterator<Item = Dialect> + '_ {
        self.records.keys().copied()
    }

    /// Every record in (dialect, operator) order.
    pub fn iter(&self) -> impl Iterator<Item = (Dialect, &str, &StatisticsRecord)> {
        self.records.iter().flat_map(|(dialect, ops)| {
            ops.iter()
                .map(move |(op, record)| (*dialect, op.as_str(), record))
        })
    }

    /// A dialect's operators, best first. Ties are broken by operator name.
    pub fn ranked(&self, dialect: Dialect, by: RankBy) -> Vec<(&str, &StatisticsRecord)> {
        let mut rows: Vec<(&str, &StatisticsRecord)> = self
            .records
            .get(&dialect)
            .into_iter()
            .flat_map(|ops| ops.iter().map(|(op, r)| (op.as_str(), r)))
            .collect();
        rows.sort_by(|(a_op, a), (b_op, b)| {
            let primary = match by {
                RankBy::Coverage => b.coverage.partial_cmp(&a.coverage).unwrap_or(Ordering::Equal),
                RankBy::TotalUses => b.total_uses.cmp(&a.total_uses),
            };
            primary.then_with(|| a_op.cmp(b_op))
        });
        rows
    }

    pub fn len(&self) -> usize {
        self.records.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Turns raw per-repository counts into comparative metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatisticsEngine;

impl StatisticsEngine {
    /// One record per (dialect, operator) in the table.
    ///
    /// Only existing cells are considered; see [`UsageTable::backfill`] for
    /// counting allow-listed repositories without matching files.
    pub fn compute(table: &UsageTable) -> StatisticsTable {
        let mut records: BTreeMap<Dialect, BTreeMap<String, StatisticsRecord>> = BTreeMap::new();
        for dialect in table.dialects() {
            let ops = records.entry(dialect).or_default();
            for operator in table.operators(dialect) {
                let values = table.values(dialect, operator);
                ops.insert(operator.to_string(), StatisticsRecord::from_values(&values));
            }
        }
        tracing::debug!(records = records.values().map(BTreeMap::len).sum::<usize>(), "statistics computed");
        StatisticsTable { records }
    }
}
