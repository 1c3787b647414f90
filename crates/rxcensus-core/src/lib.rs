//! rxcensus-core: shared foundation for the rxcensus workspace.
//!
//! - Types: the closed dialect set, operator catalog, allow-list, usage table
//! - Errors: one `thiserror` enum per subsystem, aggregated by `PipelineError`
//! - Config: TOML-based, layered resolution (CLI > env > project > defaults)
//! - Tracing: `RXCENSUS_LOG`-driven subscriber setup

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod types;

pub use config::RxCensusConfig;
pub use errors::{ErrorCode, PipelineError};
pub use types::{AllowList, Dialect, OperatorCatalog, RepositoryId, UsageTable};
