//! Workspace-wide constants.

/// Project config file looked up in the working root.
pub const PROJECT_CONFIG_FILE: &str = "rxcensus.toml";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "RXCENSUS_LOG";

/// Prefix for environment overrides (`RXCENSUS_SCAN_THREADS`, ...).
pub const ENV_PREFIX: &str = "RXCENSUS_";

/// Owners whose repositories are the reactive libraries themselves, not users of them.
pub const DEFAULT_EXCLUDED_OWNERS: &[&str] = &[
    "ReactiveX",
    "dotnet",
    "neuecc",
    "bjornbytes",
    "alfert",
    "Reactive-Extensions",
];

/// Repositories cloned per dialect unless configured otherwise.
pub const DEFAULT_CLONES_PER_DIALECT: usize = 50;

/// The search API never returns more than this many results for one query.
pub const SEARCH_RESULT_CAP: u64 = 1000;
