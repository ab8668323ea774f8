//! Pakr CLI - Command-line utility for bzip2/zstd file and directory
//! archiving.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod progress;

use anyhow::Result;
use clap::Parser;
use std::time::Instant;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    logging::init_logging(cli.verbose);
    tracing::debug!(?cli, "parsed arguments");

    let start = Instant::now();
    let report = commands::run(&cli)?;
    let elapsed = start.elapsed();

    if cli.verbose > 0 {
        output::Summary::new().print(&report);
    }
    if cli.benchmark {
        output::print_elapsed(elapsed);
    }

    Ok(())
}
