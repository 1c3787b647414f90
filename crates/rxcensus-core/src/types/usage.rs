//! The usage table: occurrence counts per (dialect, operator, repository).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::allow_list::AllowList;
use super::catalog::OperatorCatalog;
use super::dialect::Dialect;
use super::identifiers::RepositoryId;

type RepositoryCounts = BTreeMap<RepositoryId, u64>;

/// Dialect → operator → repository → count.
///
/// Cells only ever exist for repositories that contained at least one
/// matching file, unless [`UsageTable::backfill`] filled the allow-list in.
/// A missing cell and a zero cell are different things to the statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageTable {
    cells: BTreeMap<Dialect, BTreeMap<String, RepositoryCounts>>,
}

/// One flattened cell, in the column order of the usage CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageRow<'a> {
    pub dialect: Dialect,
    pub repository: &'a RepositoryId,
    pub operator: &'a str,
    pub count: u64,
}

impl UsageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table holding every catalogued operator with no repository cells yet.
    pub fn seeded(catalog: &OperatorCatalog) -> Self {
        let mut table = Self::new();
        for (dialect, operators) in catalog.iter() {
            let ops = table.cells.entry(dialect).or_default();
            for op in operators {
                ops.entry(op.clone()).or_default();
            }
        }
        table
    }

    /// Add `count` to a cell, creating it at zero first.
    ///
    /// A zero count still creates the cell: it records that the repository
    /// had matching files without using this operator.
    pub fn add(&mut self, dialect: Dialect, operator: &str, repository: &RepositoryId, count: u64) {
        let repos = self
            .cells
            .entry(dialect)
            .or_default()
            .entry(operator.to_string())
            .or_default();
        match repos.get_mut(repository) {
            Some(cell) => *cell += count,
            None => {
                repos.insert(repository.clone(), count);
            }
        }
    }

    pub fn get(&self, dialect: Dialect, operator: &str, repository: &str) -> Option<u64> {
        self.cells
            .get(&dialect)?
            .get(operator)?
            .get(repository)
            .copied()
    }

    /// Repository cells for one operator.
    pub fn counts(&self, dialect: Dialect, operator: &str) -> Option<&BTreeMap<RepositoryId, u64>> {
        self.cells.get(&dialect)?.get(operator)
    }

    /// The cell values for one operator, in repository order.
    pub fn values(&self, dialect: Dialect, operator: &str) -> Vec<u64> {
        self.counts(dialect, operator)
            .map(|repos| repos.values().copied().collect())
            .unwrap_or_default()
    }

    pub fn dialects(&self) -> impl Iterator<Item = Dialect> + '_ {
        self.cells.keys().copied()
    }

    pub fn operators(&self, dialect: Dialect) -> impl Iterator<Item = &str> {
        self.cells
            .get(&dialect)
            .into_iter()
            .flat_map(|ops| ops.keys().map(String::as_str))
    }

    /// Fold `other` into `self` by summing overlapping cells.
    ///
    /// Summation makes this associative and commutative, so partitions
    /// merged in any order give the same table.
    pub fn merge_from(&mut self, other: UsageTable) {
        for (dialect, ops) in other.cells {
            let target_ops = self.cells.entry(dialect).or_default();
            for (op, repos) in ops {
                let target_repos = target_ops.entry(op).or_default();
                for (repo, count) in repos {
                    *target_repos.entry(repo).or_insert(0) += count;
                }
            }
        }
    }

    pub fn merge(mut self, other: UsageTable) -> Self {
        self.merge_from(other);
        self
    }

    /// Give every allow-listed repository an explicit zero cell for each
    /// operator of its dialect, so repositories without matching files count
    /// toward averages and coverage.
    pub fn backfill(&mut self, allow_list: &AllowList) {
        for (dialect, ops) in self.cells.iter_mut() {
            for repos in ops.values_mut() {
                for repo in allow_list.repositories(*dialect) {
                    repos.entry(repo.clone()).or_insert(0);
                }
            }
        }
    }

    /// Every cell as a row, ordered by dialect, repository, then operator.
    pub fn rows(&self) -> Vec<UsageRow<'_>> {
        let mut rows: Vec<UsageRow<'_>> = self
            .cells
            .iter()
            .flat_map(|(dialect, ops)| {
                ops.iter().flat_map(move |(op, repos)| {
                    repos.iter().map(move |(repo, count)| UsageRow {
                        dialect: *dialect,
                        repository: repo,
                        operator: op.as_str(),
                        count: *count,
                    })
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            (a.dialect, a.repository, a.operator).cmp(&(b.dialect, b.repository, b.operator))
        });
        rows
    }

    /// Number of cells across the whole table.
    pub fn cell_count(&self) -> usize {
        self.cells
            .values()
            .flat_map(|ops| ops.values())
            .map(BTreeMap::len)
            .sum()
    }
}
