//! Pipeline steps. Each reads its inputs from the workspace and writes its
//! outputs back, so steps can be re-run independently.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rxcensus_analysis::aggregation::{ExecutionMode, UsageAggregator};
use rxcensus_analysis::scanner::{FileClassifier, RepositoryFile};
use rxcensus_analysis::statistics::{RankBy, StatisticsEngine, StatisticsTable};
use rxcensus_core::config::{CliOverrides, RxCensusConfig};
use rxcensus_core::errors::PipelineError;
use rxcensus_core::types::{AllowList, Dialect, UsageTable};
use rxcensus_discovery::{
    allow_list_from_clones, ClonePlan, GitHubClient, Git2Cloner, RepositoryManifest,
    StarRangeSearch,
};
use rxcensus_storage::csv::{write_statistics_csv, write_usage_csv};
use rxcensus_storage::file_list::{load_file_list, write_file_list};
use rxcensus_storage::json::{
    load_allow_list, load_catalog, load_usage, save_allow_list, save_statistics, save_usage,
};
use rxcensus_storage::IndexLayout;

use crate::cli::Step;

/// Operators listed per dialect in the statistics summary.
const SUMMARY_TOP: usize = 5;

/// Resolved configuration and paths shared by every step.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: RxCensusConfig,
    layout: IndexLayout,
    dialects: Vec<Dialect>,
}

impl Workspace {
    pub fn load(
        root: &Path,
        config_file: Option<&Path>,
        overrides: &CliOverrides,
    ) -> Result<Self, PipelineError> {
        let config = RxCensusConfig::load(root, config_file, Some(overrides))?;
        Ok(Self::new(root, config))
    }

    pub fn new(root: &Path, config: RxCensusConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            layout: IndexLayout::from_config(root, &config.workspace),
            dialects: config.scan.effective_dialects(),
            config,
        }
    }

    pub fn layout(&self) -> &IndexLayout {
        &self.layout
    }

    pub fn dialects(&self) -> &[Dialect] {
        &self.dialects
    }

    fn clones_root(&self) -> PathBuf {
        self.config.workspace.effective_clones_dir(&self.root)
    }

    fn manifests_dir(&self) -> PathBuf {
        self.config.workspace.effective_manifests_dir(&self.root)
    }

    fn execution_mode(&self) -> ExecutionMode {
        if self.config.analysis.effective_parallel() {
            ExecutionMode::PerDialect
        } else {
            ExecutionMode::Sequential
        }
    }
}

/// Run `step`, logging how long it took.
pub fn run_step(workspace: &Workspace, step: Step) -> Result<(), PipelineError> {
    if step == Step::All {
        return [Step::FileList, Step::Scan, Step::Stats]
            .into_iter()
            .try_for_each(|inner| run_step(workspace, inner));
    }

    let started = Instant::now();
    tracing::info!(step = step.name(), "step started");
    match step {
        Step::Discover => discover(workspace)?,
        Step::Clone => clone(workspace)?,
        Step::AllowList => {
            allow_list(workspace)?;
        }
        Step::FileList => {
            file_list(workspace)?;
        }
        Step::Scan => {
            scan(workspace)?;
        }
        Step::Stats => {
            stats(workspace)?;
        }
        Step::All => {}
    }
    tracing::info!(
        step = step.name(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "step finished"
    );
    Ok(())
}

pub fn discover(workspace: &Workspace) -> Result<(), PipelineError> {
    let discovery = &workspace.config.discovery;
    let client = GitHubClient::from_config(discovery, &workspace.root);
    let search = StarRangeSearch::from_config(discovery);
    let manifests_dir = workspace.manifests_dir();

    for &dialect in workspace.dialects() {
        let query = discovery.query_for(dialect);
        let repositories = search.run(&client, &client, &query)?;
        let manifest = RepositoryManifest {
            dialect,
            query,
            repositories,
        };
        let path = manifest.save(&manifests_dir)?;
        tracing::info!(
            %dialect,
            repositories = manifest.repositories.len(),
            path = %path.display(),
            "manifest written"
        );
    }
    Ok(())
}

pub fn clone(workspace: &Workspace) -> Result<(), PipelineError> {
    let clones_root = workspace.clones_root();
    let manifests_dir = workspace.manifests_dir();

    for &dialect in workspace.dialects() {
        let manifest = RepositoryManifest::load(&manifests_dir, dialect)?;
        let plan = ClonePlan::build(&manifest, &workspace.config.clone, &clones_root);
        let report = plan.execute(&Git2Cloner);
        tracing::info!(
            %dialect,
            cloned = report.cloned.len(),
            existing = report.skipped_existing.len(),
            failed = report.failed.len(),
            "clone finished"
        );
    }
    Ok(())
}

/// Rebuild the allow-list entries of the selected dialects from the clone
/// directories, keeping entries of other dialects already on disk.
pub fn allow_list(workspace: &Workspace) -> Result<AllowList, PipelineError> {
    let dialects = workspace.dialects();
    let mut list = allow_list_from_clones(&workspace.clones_root(), dialects)?;

    let path = workspace.layout.allow_list();
    if path.exists() {
        let existing = load_allow_list(path)?;
        for dialect in existing.dialects().filter(|d| !dialects.contains(d)) {
            list.register(dialect);
            for repository in existing.repositories(dialect) {
                list.insert(dialect, repository.clone());
            }
        }
    }

    save_allow_list(path, &list)?;
    tracing::info!(path = %path.display(), "allow-list written");
    Ok(list)
}

pub fn file_list(workspace: &Workspace) -> Result<BTreeMap<Dialect, Vec<RepositoryFile>>, PipelineError> {
    let classifier = FileClassifier::from_config(&workspace.config.scan);
    let lists = classifier.classify_all(&workspace.clones_root(), workspace.dialects())?;
    for (dialect, files) in &lists {
        write_file_list(&workspace.layout.file_list(*dialect), files)?;
    }
    Ok(lists)
}

pub fn scan(workspace: &Workspace) -> Result<UsageTable, PipelineError> {
    let layout = &workspace.layout;
    let dialects = workspace.dialects();
    let catalog = load_catalog(layout.catalog())?.restricted_to(dialects);
    let allow_list = load_allow_list(layout.allow_list())?;

    let clones_root = workspace.clones_root();
    let mut files = Vec::new();
    for &dialect in dialects {
        let dialect_root = clones_root.join(dialect.name());
        files.extend(load_file_list(&layout.file_list(dialect), &dialect_root, dialect)?);
    }

    let table = UsageAggregator::new(&catalog, &allow_list)
        .mode(workspace.execution_mode())
        .threads(workspace.config.scan.effective_threads())
        .aggregate(&files)?;

    save_usage(&layout.usage_json(), &table)?;
    write_usage_csv(&layout.usage_csv(), &table)?;
    tracing::info!(cells = table.cell_count(), "usage table written");
    Ok(table)
}

pub fn stats(workspace: &Workspace) -> Result<StatisticsTable, PipelineError> {
    let layout = &workspace.layout;
    let mut usage = load_usage(&layout.usage_json())?;
    if workspace.config.analysis.effective_backfill_allow_list() {
        usage.backfill(&load_allow_list(layout.allow_list())?);
    }

    let statistics = StatisticsEngine::compute(&usage);
    save_statistics(&layout.stats_json(), &statistics)?;
    write_statistics_csv(&layout.stats_csv(), &statistics)?;

    for dialect in statistics.dialects() {
        for (operator, record) in statistics.ranked(dialect, RankBy::Coverage).into_iter().take(SUMMARY_TOP) {
            tracing::info!(
                %dialect,
                operator,
                coverage = record.coverage,
                total_uses = record.total_uses,
                "top operator"
            );
        }
    }
    Ok(statistics)
}
