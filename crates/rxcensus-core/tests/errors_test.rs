//! Tests for error codes and conversions.

use std::path::PathBuf;

use rxcensus_core::errors::{
    CatalogError, CloneError, ConfigError, DiscoveryError, ErrorCode, PipelineError, ScanError,
    StorageError,
};

#[test]
fn test_coded_string_format() {
    let err = ConfigError::ValidationFailed {
        field: "scan.max_file_size".to_string(),
        message: "must be greater than 0".to_string(),
    };
    assert_eq!(
        err.coded_string(),
        "[CONFIG_ERROR] Config validation failed for scan.max_file_size: must be greater than 0"
    );
}

#[test]
fn test_unknown_dialect_has_its_own_code() {
    let err = CatalogError::UnknownDialect {
        name: "rxcobol".to_string(),
        source_name: "operands.json".to_string(),
    };
    assert_eq!(err.error_code(), "UNKNOWN_DIALECT");
    let malformed = CatalogError::Malformed {
        source_name: "operands.json".to_string(),
        message: "eof".to_string(),
    };
    assert_eq!(malformed.error_code(), "CATALOG_ERROR");
}

#[test]
fn test_rate_limit_code() {
    assert_eq!(
        DiscoveryError::BudgetWaitExceeded { waited_secs: 10 }.error_code(),
        "RATE_LIMITED"
    );
    assert_eq!(
        DiscoveryError::RateLimited {
            url: "https://api.github.com/search/repositories".to_string()
        }
        .error_code(),
        "RATE_LIMITED"
    );
    assert_eq!(DiscoveryError::Unsupported.error_code(), "DISCOVERY_ERROR");
}

/// PipelineError keeps the subsystem's code.
#[test]
fn test_pipeline_error_delegates_code() {
    let cases: Vec<(PipelineError, &str)> = vec![
        (
            ScanError::MissingRoot {
                path: PathBuf::from("repos/rxjava"),
            }
            .into(),
            "SCAN_ERROR",
        ),
        (
            StorageError::Json {
                path: PathBuf::from("x.json"),
                message: "bad".to_string(),
            }
            .into(),
            "STORAGE_ERROR",
        ),
        (
            CloneError::Failed {
                url: "https://example.invalid/a/b.git".to_string(),
                target: PathBuf::from("repos/rxjava/a_b"),
                message: "refused".to_string(),
            }
            .into(),
            "CLONE_ERROR",
        ),
        (
            CatalogError::UnknownDialect {
                name: "x".to_string(),
                source_name: "y".to_string(),
            }
            .into(),
            "UNKNOWN_DIALECT",
        ),
    ];
    for (err, code) in cases {
        assert_eq!(err.error_code(), code);
        assert!(err.coded_string().starts_with(&format!("[{code}]")));
    }
}
