//! Top-level error for CLI steps.

use super::error_code::ErrorCode;
use super::{
    CatalogError, CloneError, ConfigError, DiscoveryError, ScanError, StorageError,
};

/// Errors that can abort a pipeline step.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Clone error: {0}")]
    Clone(#[from] CloneError),
}

impl ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Catalog(e) => e.error_code(),
            Self::Scan(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Discovery(e) => e.error_code(),
            Self::Clone(e) => e.error_code(),
        }
    }
}
