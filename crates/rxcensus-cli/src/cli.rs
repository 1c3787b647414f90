//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use rxcensus_core::config::CliOverrides;
use rxcensus_core::types::Dialect;

/// Measure how reactive-extension operators are used across open-source repositories.
#[derive(Debug, Parser)]
#[command(name = "rxcensus", version, about)]
pub struct Cli {
    /// Working root holding `rxcensus.toml`, clones and indexes.
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Config file used instead of `<root>/rxcensus.toml`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Worker threads for scanning (0 = one per core).
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Skip files larger than this many bytes.
    #[arg(long, global = true)]
    pub max_file_size: Option<u64>,

    /// Scan dialects one after another instead of in parallel.
    #[arg(long, global = true)]
    pub sequential: bool,

    /// Restrict the step to these dialects (repeatable).
    #[arg(long = "dialect", global = true)]
    pub dialects: Vec<Dialect>,

    #[command(subcommand)]
    pub step: Step,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Step {
    /// Search for repositories and write one manifest per dialect.
    Discover,
    /// Clone the most-starred repositories of each manifest.
    Clone,
    /// Write the allow-list from the cloned repository directories.
    AllowList,
    /// Write the in-scope file list of each dialect.
    FileList,
    /// Count operator usage and export the usage table.
    Scan,
    /// Compute per-operator statistics from the usage table.
    Stats,
    /// file-list, scan and stats in sequence.
    All,
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Step::Discover => "discover",
            Step::Clone => "clone",
            Step::AllowList => "allow-list",
            Step::FileList => "file-list",
            Step::Scan => "scan",
            Step::Stats => "stats",
            Step::All => "all",
        }
    }
}

impl Cli {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            scan_threads: self.threads,
            scan_max_file_size: self.max_file_size,
            sequential: self.sequential,
            dialects: self.dialects.clone(),
        }
    }
}
