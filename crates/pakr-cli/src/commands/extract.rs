//! Extract command implementation.

use crate::cli::Cli;
use crate::error::add_path_context;
use crate::error::add_transfer_context;
use crate::progress;
use anyhow::Result;
use pakr_core::ArchiveReport;
use pakr_core::Operation;
use pakr_core::TransferConfig;
use tracing::info;

pub fn execute(cli: &Cli) -> Result<ArchiveReport> {
    let operation = add_path_context(
        Operation::resolve(&cli.source, None, true, cli.output_dir.as_deref()),
        &cli.source,
    )?;

    info!(
        archive = %cli.source.display(),
        codec = %operation.codec(),
        "extracting"
    );

    let config = TransferConfig::default();
    let mut progress = progress::reporter(cli.progress);
    add_transfer_context(
        operation.run(&config, progress.as_mut()),
        &cli.source,
        &operation.destination(),
    )
}
