//! Compress command implementation.

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
        Operation::resolve(&cli.source, cli.target.as_deref(), false, None),
        &cli.source,
    )?;

    let mut config = TransferConfig::default();
    if let Some(level) = cli.level {
        config = config.with_compression_level(level);
    }

    info!(
        source = %cli.source.display(),
        codec = %operation.codec(),
        "compressing"
    );

    let mut progress = progress::reporter(cli.progress);
    add_transfer_context(
        operation.run(&config, progress.as_mut()),
        &cli.source,
        &operation.destination(),
    )
}
