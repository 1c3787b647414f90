//! Error handling for rxcensus.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod catalog_error;
pub mod clone_error;
pub mod config_error;
pub mod discovery_error;
pub mod error_code;
pub mod pipeline_error;
pub mod scan_error;
pub mod storage_error;

pub use catalog_error::CatalogError;
pub use clone_error::CloneError;
pub use config_error::ConfigError;
pub use discovery_error::DiscoveryError;
pub use error_code::ErrorCode;
pub use pipeline_error::PipelineError;
pub use scan_error::ScanError;
pub use storage_error::StorageError;
