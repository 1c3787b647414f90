use std::process::ExitCode;

use clap::Parser;

use rxcensus_cli::{run_step, Cli, Workspace};
use rxcensus_core::errors::{ErrorCode, PipelineError};
use rxcensus_core::tracing::init_tracing;

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(step = cli.step.name(), error = %e, "step failed");
            eprintln!("{}", e.coded_string());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), PipelineError> {
    let workspace = Workspace::load(&cli.root, cli.config.as_deref(), &cli.overrides())?;
    run_step(&workspace, cli.step)
}
