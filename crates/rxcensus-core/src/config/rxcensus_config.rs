//! Top-level rxcensus configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AnalysisConfig, CloneConfig, DiscoveryConfig, ScanConfig, WorkspaceConfig};
use crate::constants::{ENV_PREFIX, PROJECT_CONFIG_FILE};
use crate::errors::ConfigError;
use crate::types::Dialect;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RXCENSUS_*`)
/// 3. Project config (`rxcensus.toml` in the working root, or `--config`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RxCensusConfig {
    pub workspace: WorkspaceConfig,
    pub scan: ScanConfig,
    pub analysis: AnalysisConfig,
    pub discovery: DiscoveryConfig,
    pub clone: CloneConfig,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub scan_threads: Option<usize>,
    pub scan_max_file_size: Option<u64>,
    pub sequential: bool,
    pub dialects: Vec<Dialect>,
}

impl RxCensusConfig {
    /// Load configuration with layered resolution.
    ///
    /// `config_file` replaces the project file lookup and must exist.
    pub fn load(
        root: &Path,
        config_file: Option<&Path>,
        cli_overrides: Option<&CliOverrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        match config_file {
            Some(path) => Self::merge_toml_file(&mut config, path)?,
            None => {
                let project_config_path = root.join(PROJECT_CONFIG_FILE);
                if project_config_path.exists() {
                    Self::merge_toml_file(&mut config, &project_config_path)?;
                }
            }
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        tracing::debug!(root = %root.display(), "configuration resolved");

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(config: &RxCensusConfig) -> Result<(), ConfigError> {
        if config.scan.max_file_size == Some(0) {
            return Err(invalid("scan.max_file_size", "must be greater than 0"));
        }
        if config.clone.per_dialect == Some(0) {
            return Err(invalid("clone.per_dialect", "must be greater than 0"));
        }
        if config.discovery.effective_min_stars() > config.discovery.effective_max_stars() {
            return Err(invalid(
                "discovery.min_stars",
                "must not exceed discovery.max_stars",
            ));
        }
        if config.discovery.poll_interval_secs == Some(0) {
            return Err(invalid("discovery.poll_interval_secs", "must be greater than 0"));
        }
        if config.discovery.window_step == Some(0) {
            return Err(invalid("discovery.window_step", "must be greater than 0"));
        }
        if let Some(key) = config
            .discovery
            .queries
            .keys()
            .find(|k| k.parse::<Dialect>().is_err())
        {
            return Err(invalid(
                "discovery.queries",
                &format!("'{key}' is not a known dialect"),
            ));
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut RxCensusConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RxCensusConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` (or non-empty) value.
    pub fn merge(base: &mut RxCensusConfig, other: &RxCensusConfig) {
        // Workspace
        let (b, o) = (&mut base.workspace, &other.workspace);
        override_with(&mut b.clones_dir, &o.clones_dir);
        override_with(&mut b.index_dir, &o.index_dir);
        override_with(&mut b.manifests_dir, &o.manifests_dir);
        override_with(&mut b.catalog_path, &o.catalog_path);
        override_with(&mut b.allow_list_path, &o.allow_list_path);

        // Scan
        let (b, o) = (&mut base.scan, &other.scan);
        override_with(&mut b.max_file_size, &o.max_file_size);
        override_with(&mut b.threads, &o.threads);
        override_with(&mut b.follow_symlinks, &o.follow_symlinks);
        if !o.dialects.is_empty() {
            b.dialects = o.dialects.clone();
        }

        // Analysis
        override_with(&mut base.analysis.parallel, &other.analysis.parallel);
        override_with(
            &mut base.analysis.backfill_allow_list,
            &other.analysis.backfill_allow_list,
        );

        // Discovery
        let (b, o) = (&mut base.discovery, &other.discovery);
        override_with(&mut b.api_base, &o.api_base);
        override_with(&mut b.token_path, &o.token_path);
        override_with(&mut b.min_stars, &o.min_stars);
        override_with(&mut b.max_stars, &o.max_stars);
        override_with(&mut b.window_step, &o.window_step);
        override_with(&mut b.poll_interval_secs, &o.poll_interval_secs);
        override_with(&mut b.max_wait_secs, &o.max_wait_secs);
        override_with(&mut b.max_retries, &o.max_retries);
        for (dialect, query) in &o.queries {
            b.queries.insert(dialect.clone(), query.clone());
        }

        // Clone
        let (b, o) = (&mut base.clone, &other.clone);
        override_with(&mut b.per_dialect, &o.per_dialect);
        override_with(&mut b.remote_base, &o.remote_base);
        if !o.excluded_owners.is_empty() {
            b.excluded_owners = o.excluded_owners.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `RXCENSUS_SCAN_THREADS`, `RXCENSUS_CLONE_PER_DIALECT`, etc.
    /// Unparseable values are ignored.
    fn apply_env_overrides(config: &mut RxCensusConfig) {
        if let Some(v) = env_parse::<u64>("SCAN_MAX_FILE_SIZE") {
            config.scan.max_file_size = Some(v);
        }
        if let Some(v) = env_parse::<usize>("SCAN_THREADS") {
            config.scan.threads = Some(v);
        }
        if let Some(v) = env_parse::<bool>("ANALYSIS_PARALLEL") {
            config.analysis.parallel = Some(v);
        }
        if let Some(v) = env_parse::<bool>("ANALYSIS_BACKFILL_ALLOW_LIST") {
            config.analysis.backfill_allow_list = Some(v);
        }
        if let Some(v) = env_parse::<u64>("DISCOVERY_MIN_STARS") {
            config.discovery.min_stars = Some(v);
        }
        if let Some(v) = env_parse::<u64>("DISCOVERY_MAX_STARS") {
            config.discovery.max_stars = Some(v);
        }
        if let Some(v) = env_parse::<std::path::PathBuf>("DISCOVERY_TOKEN_PATH") {
            config.discovery.token_path = Some(v);
        }
        if let Some(v) = env_parse::<usize>("CLONE_PER_DIALECT") {
            config.clone.per_dialect = Some(v);
        }
        if let Some(v) = env_parse::<std::path::PathBuf>("WORKSPACE_CLONES_DIR") {
            config.workspace.clones_dir = Some(v);
        }
        if let Some(v) = env_parse::<std::path::PathBuf>("WORKSPACE_INDEX_DIR") {
            config.workspace.index_dir = Some(v);
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut RxCensusConfig, cli: &CliOverrides) {
        if let Some(v) = cli.scan_threads {
            config.scan.threads = Some(v);
        }
        if let Some(v) = cli.scan_max_file_size {
            config.scan.max_file_size = Some(v);
        }
        if cli.sequential {
            config.analysis.parallel = Some(false);
        }
        if !cli.dialects.is_empty() {
            config.scan.dialects = cli.dialects.clone();
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn override_with<T: Clone>(base: &mut Option<T>, other: &Option<T>) {
    if other.is_some() {
        base.clone_from(other);
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(format!("{ENV_PREFIX}{key}"))
        .ok()
        .and_then(|val| val.parse::<T>().ok())
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
