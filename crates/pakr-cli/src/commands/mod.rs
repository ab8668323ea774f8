//! Command implementations.

pub mod compress;
pub mod extract;

use crate::cli::Cli;
use anyhow::Result;
use pakr_core::ArchiveReport;

/// Runs the operation selected by the `-x` flag.
pub fn run(cli: &Cli) -> Result<ArchiveReport> {
    if cli.extract {
        extract::execute(cli)
    } else {
        compress::execute(cli)
    }
}
