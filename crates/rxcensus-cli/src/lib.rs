//! rxcensus-cli: the `rxcensus` pipeline as discrete, re-runnable steps.
//!
//! - `cli`: argument parsing
//! - `steps`: discover, clone, allow-list, file-list, scan and stats

pub mod cli;
pub mod steps;

pub use cli::{Cli, Step};
pub use steps::{run_step, Workspace};
