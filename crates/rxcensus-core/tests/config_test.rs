//! Tests for the rxcensus configuration system.

use std::path::Path;
use std::sync::Mutex;

use rxcensus_core::config::{CliOverrides, RxCensusConfig};
use rxcensus_core::errors::ConfigError;
use rxcensus_core::Dialect;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all RXCENSUS_ env vars to prevent cross-test contamination.
fn clear_env_vars() {
    for key in [
        "RXCENSUS_SCAN_MAX_FILE_SIZE",
        "RXCENSUS_SCAN_THREADS",
        "RXCENSUS_ANALYSIS_PARALLEL",
        "RXCENSUS_ANALYSIS_BACKFILL_ALLOW_LIST",
        "RXCENSUS_DISCOVERY_MIN_STARS",
        "RXCENSUS_DISCOVERY_MAX_STARS",
        "RXCENSUS_DISCOVERY_TOKEN_PATH",
        "RXCENSUS_CLONE_PER_DIALECT",
        "RXCENSUS_WORKSPACE_CLONES_DIR",
        "RXCENSUS_WORKSPACE_INDEX_DIR",
    ] {
        std::env::remove_var(key);
    }
}

/// CLI beats env, env beats the project file.
#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("rxcensus.toml"),
        r#"
[scan]
max_file_size = 2_000_000
threads = 2

[clone]
per_dialect = 20
"#,
    )
    .unwrap();

    std::env::set_var("RXCENSUS_SCAN_MAX_FILE_SIZE", "5000000");
    std::env::set_var("RXCENSUS_SCAN_THREADS", "4");

    let cli = CliOverrides {
        scan_threads: Some(8),
        ..Default::default()
    };
    let config = RxCensusConfig::load(dir.path(), None, Some(&cli)).unwrap();

    assert_eq!(config.scan.threads, Some(8));
    assert_eq!(config.scan.max_file_size, Some(5_000_000));
    assert_eq!(config.clone.effective_per_dialect(), 20);

    clear_env_vars();
}

/// No project file: compiled defaults apply.
#[test]
fn test_load_defaults_without_project_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let config = RxCensusConfig::load(dir.path(), None, None).unwrap();

    assert_eq!(config.scan.effective_max_file_size(), 10 * 1024 * 1024);
    assert_eq!(config.clone.effective_per_dialect(), 50);
    assert_eq!(config.discovery.effective_min_stars(), 10);
    assert_eq!(config.discovery.effective_max_stars(), 1_000_000);
    assert!(config.analysis.effective_parallel());
    assert!(!config.analysis.effective_backfill_allow_list());
    assert_eq!(config.scan.effective_dialects(), Dialect::ALL.to_vec());
    assert!(config
        .clone
        .effective_excluded_owners()
        .contains(&"ReactiveX".to_string()));
    assert_eq!(
        config.workspace.effective_catalog_path(dir.path()),
        dir.path().join("indexes/operands.json")
    );
}

/// An explicit config file must exist.
#[test]
fn test_explicit_config_file_missing() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let missing = dir.path().join("nope.toml");
    let err = RxCensusConfig::load(dir.path(), Some(&missing), None).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

/// An explicit config file replaces the project file lookup.
#[test]
fn test_explicit_config_file_used() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("rxcensus.toml"), "[clone]\nper_dialect = 7\n").unwrap();
    let other = dir.path().join("other.toml");
    std::fs::write(&other, "[clone]\nper_dialect = 3\n").unwrap();

    let config = RxCensusConfig::load(dir.path(), Some(&other), None).unwrap();
    assert_eq!(config.clone.per_dialect, Some(3));
}

/// Invalid TOML surfaces a parse error naming the file.
#[test]
fn test_invalid_toml() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("rxcensus.toml"), "[scan\nthreads = ").unwrap();
    let err = RxCensusConfig::load(dir.path(), None, None).unwrap_err();
    match err {
        ConfigError::ParseError { path, .. } => assert!(path.ends_with("rxcensus.toml")),
        other => panic!("expected ParseError, got {other:?}"),
    }
}

/// Unknown keys are ignored.
#[test]
fn test_unknown_keys_ignored() {
    let config = RxCensusConfig::from_toml(
        r#"
[scan]
threads = 3
flux_capacitor = true

[telemetry]
enabled = true
"#,
    )
    .unwrap();
    assert_eq!(config.scan.threads, Some(3));
}

#[test]
fn test_validation_rejects_zero_max_file_size() {
    let config = RxCensusConfig::from_toml("[scan]\nmax_file_size = 0\n").unwrap();
    let err = RxCensusConfig::validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "scan.max_file_size"));
}

#[test]
fn test_validation_rejects_zero_sample() {
    let config = RxCensusConfig::from_toml("[clone]\nper_dialect = 0\n").unwrap();
    assert!(RxCensusConfig::validate(&config).is_err());
}

#[test]
fn test_validation_rejects_inverted_star_range() {
    let config =
        RxCensusConfig::from_toml("[discovery]\nmin_stars = 500\nmax_stars = 100\n").unwrap();
    let err = RxCensusConfig::validate(&config).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { ref field, .. } if field == "discovery.min_stars"));
}

#[test]
fn test_validation_rejects_unknown_query_dialect() {
    let config =
        RxCensusConfig::from_toml("[discovery.queries]\nrxcobol = \"rx cobol\"\n").unwrap();
    assert!(RxCensusConfig::validate(&config).is_err());
}

#[test]
fn test_dialect_list_and_queries() {
    let config = RxCensusConfig::from_toml(
        r#"
[scan]
dialects = ["rxswift", "rxjava", "rxswift"]

[discovery.queries]
rxjs = "rxjs language:typescript"
"#,
    )
    .unwrap();
    assert_eq!(
        config.scan.effective_dialects(),
        vec![Dialect::RxJava, Dialect::RxSwift]
    );
    assert_eq!(
        config.discovery.query_for(Dialect::RxJs),
        "rxjs language:typescript"
    );
    assert_eq!(config.discovery.query_for(Dialect::RxDart), "rxdart");
}

/// Merge only overrides set values.
#[test]
fn test_merge_keeps_unset_fields() {
    let mut base = RxCensusConfig::from_toml("[scan]\nthreads = 2\nmax_file_size = 100\n").unwrap();
    let other = RxCensusConfig::from_toml("[scan]\nthreads = 6\n").unwrap();
    RxCensusConfig::merge(&mut base, &other);
    assert_eq!(base.scan.threads, Some(6));
    assert_eq!(base.scan.max_file_size, Some(100));
}

#[test]
fn test_sequential_flag_disables_parallel() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_env_vars();

    let dir = tempdir();
    let cli = CliOverrides {
        sequential: true,
        dialects: vec![Dialect::RxDart],
        ..Default::default()
    };
    let config = RxCensusConfig::load(dir.path(), None, Some(&cli)).unwrap();
    assert!(!config.analysis.effective_parallel());
    assert_eq!(config.scan.effective_dialects(), vec![Dialect::RxDart]);
}

#[test]
fn test_absolute_workspace_paths_kept() {
    let config = RxCensusConfig::from_toml("[workspace]\nclones_dir = \"/data/clones\"\n").unwrap();
    assert_eq!(
        config.workspace.effective_clones_dir(Path::new("/work")),
        Path::new("/data/clones")
    );
    assert_eq!(
        config.workspace.effective_index_dir(Path::new("/work")),
        Path::new("/work/indexes")
    );
}

#[test]
fn test_toml_round_trip() {
    let config = RxCensusConfig::from_toml(
        r#"
[scan]
threads = 4

[clone]
per_dialect = 12
excluded_owners = ["someorg"]
"#,
    )
    .unwrap();
    let text = config.to_toml().unwrap();
    let back = RxCensusConfig::from_toml(&text).unwrap();
    assert_eq!(back.scan.threads, Some(4));
    assert_eq!(back.clone.per_dialect, Some(12));
    assert_eq!(back.clone.effective_excluded_owners(), vec!["someorg".to_string()]);
}
