//! The usage aggregator.

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use rayon::prelude::*;
use rustc_hash::FxHashSet;
use rxcensus_core::errors::{CatalogError, PipelineError, ScanError};
use rxcensus_core::types::{AllowList, Dialect, OperatorCatalog, UsageTable};

use super::loader::{FsLoader, SourceLoader};
use crate::engine::OperatorMatcher;
use crate::scanner::RepositoryFile;

/// How dialect partitions are scheduled. Both modes produce identical tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    Sequential,
    /// One rayon task per dialect; partial tables are merged afterwards.
    #[default]
    PerDialect,
}

/// Per-run counters, logged when aggregation finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregationSummary {
    pub files_scanned: usize,
    pub files_not_allowed: usize,
    pub files_unreadable: usize,
    pub files_duplicate: usize,
}

impl AggregationSummary {
    fn absorb(&mut self, other: AggregationSummary) {
        self.files_scanned += other.files_scanned;
        self.files_not_allowed += other.files_not_allowed;
        self.files_unreadable += other.files_unreadable;
        self.files_duplicate += other.files_duplicate;
    }
}

/// Folds per-file operator counts into a [`UsageTable`].
pub struct UsageAggregator<'a, L: SourceLoader = FsLoader> {
    catalog: &'a OperatorCatalog,
    allow_list: &'a AllowList,
    loader: L,
    mode: ExecutionMode,
    threads: usize,
}

impl<'a> UsageAggregator<'a, FsLoader> {
    pub fn new(catalog: &'a OperatorCatalog, allow_list: &'a AllowList) -> Self {
        Self::with_loader(catalog, allow_list, FsLoader)
    }
}

impl<'a, L: SourceLoader> UsageAggregator<'a, L> {
    pub fn with_loader(catalog: &'a OperatorCatalog, allow_list: &'a AllowList, loader: L) -> Self {
        Self {
            catalog,
            allow_list,
            loader,
            mode: ExecutionMode::default(),
            threads: 0,
        }
    }

    pub fn mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Size of the dedicated worker pool. 0 = rayon's global pool.
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Build the usage table for `files`.
    ///
    /// The result is seeded with every catalogued (dialect, operator) pair and
    /// is independent of the order of `files`. Files from repositories outside
    /// the allow-list contribute nothing. A file whose dialect is missing from
    /// the catalog aborts the run.
    pub fn aggregate(&self, files: &[RepositoryFile]) -> Result<UsageTable, PipelineError> {
        let start = Instant::now();
        let mut partitions: BTreeMap<Dialect, Vec<&RepositoryFile>> = BTreeMap::new();
        for file in files {
            partitions.entry(file.dialect()).or_default().push(file);
        }
        for dialect in partitions.keys() {
            self.catalog.require(*dialect)?;
        }

        let results: Vec<(UsageTable, AggregationSummary)> = match self.mode {
            ExecutionMode::Sequential => partitions
                .iter()
                .map(|(dialect, files)| self.aggregate_dialect(*dialect, files))
                .collect::<Result<_, _>>()?,
            ExecutionMode::PerDialect => {
                let run = || {
                    partitions
                        .par_iter()
                        .map(|(dialect, files)| self.aggregate_dialect(*dialect, files))
                        .collect::<Result<Vec<_>, _>>()
                };
                if self.threads > 0 {
                    rayon::ThreadPoolBuilder::new()
                        .num_threads(self.threads)
                        .build()
                        .map_err(|e| ScanError::ThreadPool(e.to_string()))?
                        .install(run)?
                } else {
                    run()?
                }
            }
        };

        let mut table = UsageTable::seeded(self.catalog);
        let mut summary = AggregationSummary::default();
        for (partial, counts) in results {
            table.merge_from(partial);
            summary.absorb(counts);
        }

        tracing::info!(
            mode = ?self.mode,
            files_scanned = summary.files_scanned,
            files_not_allowed = summary.files_not_allowed,
            files_unreadable = summary.files_unreadable,
            files_duplicate = summary.files_duplicate,
            cells = table.cell_count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "aggregation complete"
        );
        Ok(table)
    }

    /// One dialect's partition. Produces cells for `dialect` only.
    fn aggregate_dialect(
        &self,
        dialect: Dialect,
        files: &[&RepositoryFile],
    ) -> Result<(UsageTable, AggregationSummary), CatalogError> {
        let matcher = OperatorMatcher::new(dialect, self.catalog.require(dialect)?)?;
        let mut table = UsageTable::new();
        let mut summary = AggregationSummary::default();
        let mut seen: FxHashSet<&Path> = FxHashSet::default();

        for file in files {
            if !seen.insert(file.path()) {
                summary.files_duplicate += 1;
                continue;
            }
            if !self.allow_list.contains(dialect, file.repository().as_str()) {
                summary.files_not_allowed += 1;
                continue;
            }
            let counts = match self.loader.load(file) {
                Ok(bytes) => matcher.count_bytes(&bytes),
                Err(e) => {
                    tracing::debug!(path = %file.path().display(), error = %e, "unreadable file counted as zero");
                    summary.files_unreadable += 1;
                    matcher.zero_counts()
                }
            };
            for (operator, count) in &counts {
                table.add(dialect, operator, file.repository(), *count);
            }
            summary.files_scanned += 1;
        }

        tracing::debug!(%dialect, files = summary.files_scanned, "dialect aggregated");
        Ok((table, summary))
    }
}
