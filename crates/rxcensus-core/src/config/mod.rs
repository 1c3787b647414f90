//! Configuration system for rxcensus.
//! TOML-based, layered resolution: CLI > env > project > defaults.

pub mod analysis_config;
pub mod clone_config;
pub mod discovery_config;
pub mod rxcensus_config;
pub mod scan_config;
pub mod workspace_config;

pub use analysis_config::AnalysisConfig;
pub use clone_config::CloneConfig;
pub use discovery_config::DiscoveryConfig;
pub use rxcensus_config::{CliOverrides, RxCensusConfig};
pub use scan_config::ScanConfig;
pub use workspace_config::WorkspaceConfig;
