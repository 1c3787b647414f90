//! Per-operator statistics.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, Median};

/// The most frequent count, or every tied count joined as `"a|b|c"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModeValue {
    Single(u64),
    Tied(String),
}

impl fmt::Display for ModeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeValue::Single(v) => write!(f, "{v}"),
            ModeValue::Tied(joined) => f.write_str(joined),
        }
    }
}

/// Metrics for one (dialect, operator) over the repositories with a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsRecord {
    pub total_uses: u64,
    pub repos_present: u64,
    /// `repos_present / repositories considered`.
    pub coverage: f64,
    pub median: f64,
    pub mode: ModeValue,
    /// `total_uses / repositories considered`.
    pub average_all: f64,
    /// `total_uses / repos_present`, zero when no repository uses the operator.
    pub average_present: f64,
}

impl StatisticsRecord {
    /// All zeros, mode included.
    pub fn empty() -> Self {
        Self {
            total_uses: 0,
            repos_present: 0,
            coverage: 0.0,
            median: 0.0,
            mode: ModeValue::Single(0),
            average_all: 0.0,
            average_present: 0.0,
        }
    }

    pub fn from_values(values: &[u64]) -> Self {
        if values.is_empty() {
            return Self::empty();
        }

        let considered = values.len() as f64;
        let total_uses: u64 = values.iter().sum();
        let repos_present = values.iter().filter(|&&v| v > 0).count() as u64;
        let median = Data::new(values.iter().map(|&v| v as f64).collect::<Vec<_>>()).median();

        Self {
            total_uses,
            repos_present,
            coverage: repos_present as f64 / considered,
            median,
            mode: mode_of(values),
            average_all: total_uses as f64 / considered,
            average_present: if repos_present > 0 {
                total_uses as f64 / repos_present as f64
            } else {
                0.0
            },
        }
    }
}

fn mode_of(values: &[u64]) -> ModeValue {
    let mut frequencies: FxHashMap<u64, usize> = FxHashMap::default();
    for &v in values {
        *frequencies.entry(v).or_insert(0) += 1;
    }
    let highest = frequencies.values().copied().max().unwrap_or(0);
    let mut modal: Vec<u64> = frequencies
        .into_iter()
        .filter(|&(_, n)| n == highest)
        .map(|(v, _)| v)
        .collect();
    modal.sort_unstable();

    match modal.as_slice() {
        [] => ModeValue::Single(0),
        [single] => ModeValue::Single(*single),
        tied => ModeValue::Tied(
            tied.iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join("|"),
        ),
    }
}
