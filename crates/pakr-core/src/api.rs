//! High-level compress and extract operations.
//!
//! These functions tie codec detection, tar bundling and the transfer engine
//! together. Archive names are validated before any file is touched.

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;

use crate::ArchiveError;
use crate::ArchiveReport;
use crate::ProgressCallback;
use crate::Result;
use crate::TransferConfig;
use crate::bundle::TempTar;
use crate::bundle::bundle_in;
use crate::bundle::unbundle;
use crate::formats::CompressionCodec;
use crate::formats::decompressed_path;
use crate::formats::detect_codec;
use crate::formats::is_tar_payload;
use crate::transfer::compress_file;
use crate::transfer::decompress_file;

/// A validated compress or extract request.
///
/// # Examples
///
/// ```
/// use pakr_core::Operation;
/// use pakr_core::formats::CompressionCodec;
/// use std::path::Path;
///
/// let op = Operation::resolve(Path::new("docs"), Some(Path::new("docs.tar.zst")), false, None)?;
/// assert_eq!(op.codec(), CompressionCodec::Zstd);
///
/// // Unsupported suffixes fail before any I/O
/// assert!(Operation::resolve(Path::new("docs"), Some(Path::new("docs.gz")), false, None).is_err());
/// # Ok::<(), pakr_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Compress a file or directory into an archive.
    Compress {
        /// File or directory to compress.
        source: PathBuf,
        /// Archive to create.
        target: PathBuf,
        /// Codec selected by the target's suffix.
        codec: CompressionCodec,
    },
    /// Extract an archive.
    Extract {
        /// Archive to extract.
        archive: PathBuf,
        /// Explicit output directory, if any.
        output_dir: Option<PathBuf>,
        /// Codec selected by the archive's suffix.
        codec: CompressionCodec,
    },
}

impl Operation {
    /// Builds an operation from command-line style inputs.
    ///
    /// `extract` selects the direction. When compressing, `target` is
    /// required and `output_dir` is ignored; when extracting, `target` is
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::MissingTarget`] when compressing without a
    /// target, and [`ArchiveError::UnsupportedFormat`] when the archive
    /// name does not end in `.bz2` or `.zst`.
    pub fn resolve(
        source: &Path,
        target: Option<&Path>,
        extract: bool,
        output_dir: Option<&Path>,
    ) -> Result<Self> {
        if extract {
            let codec = detect_codec(source)?;
            return Ok(Self::Extract {
                archive: source.to_path_buf(),
                output_dir: output_dir.map(Path::to_path_buf),
                codec,
            });
        }

        let target = target.ok_or(ArchiveError::MissingTarget)?;
        let codec = detect_codec(target)?;
        Ok(Self::Compress {
            source: source.to_path_buf(),
            target: target.to_path_buf(),
            codec,
        })
    }

    /// Returns the codec selected for this operation.
    #[must_use]
    pub const fn codec(&self) -> CompressionCodec {
        match self {
            Self::Compress { codec, .. } | Self::Extract { codec, .. } => *codec,
        }
    }

    /// Returns where the operation writes its output.
    ///
    /// This is the archive when compressing. When extracting it is the
    /// unpack directory for tar payloads, and the decompressed file
    /// otherwise.
    #[must_use]
    pub fn destination(&self) -> PathBuf {
        match self {
            Self::Compress { target, .. } => target.clone(),
            Self::Extract {
                archive,
                output_dir,
                ..
            } => {
                let Ok((_, payload)) = decompressed_path(archive) else {
                    return archive.clone();
                };
                if is_tar_payload(&payload) {
                    return output_dir
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("."));
                }
                match (output_dir, payload.file_name()) {
                    (Some(dir), Some(name)) => dir.join(name),
                    _ => payload,
                }
            }
        }
    }

    /// Runs the operation.
    ///
    /// # Errors
    ///
    /// See [`compress_path`] and [`extract_archive`].
    pub fn run(
        &self,
        config: &TransferConfig,
        progress: &mut dyn ProgressCallback,
    ) -> Result<ArchiveReport> {
        match self {
            Self::Compress { source, target, .. } => {
                compress_path(source, target, config, progress)
            }
            Self::Extract {
                archive,
                output_dir,
                ..
            } => extract_archive(archive, output_dir.as_deref(), config, progress),
        }
    }
}

/// Compresses a file or directory into `target`.
///
/// The codec is chosen from the suffix of `target`. A directory is first
/// bundled into a temporary tar file, which is removed afterwards whether
/// compression succeeds or not.
///
/// # Errors
///
/// Returns an error if:
/// - `target` does not end in `.bz2` or `.zst` (checked before any I/O)
/// - The configuration is invalid
/// - `source` is missing or unreadable
/// - Writing `target` fails
///
/// # Examples
///
/// ```no_run
/// use pakr_core::NoopProgress;
/// use pakr_core::TransferConfig;
/// use pakr_core::compress_path;
/// use std::path::Path;
///
/// let report = compress_path(
///     Path::new("docs"),
///     Path::new("docs.tar.bz2"),
///     &TransferConfig::default(),
///     &mut NoopProgress,
/// )?;
/// println!("wrote {} bytes", report.transfer.bytes_written);
/// # Ok::<(), pakr_core::ArchiveError>(())
/// ```
pub fn compress_path(
    source: &Path,
    target: &Path,
    config: &TransferConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ArchiveReport> {
    let codec = detect_codec(target)?;
    config.validate()?;
    let start = Instant::now();

    let (transfer, tar_bundled) = if fs::metadata(source)?.is_dir() {
        let tar = bundle_in(source, config.temp_dir.as_deref())?;
        let transfer = compress_file(tar.path(), target, codec, config, progress)?;
        tar.close()?;
        (transfer, true)
    } else {
        (compress_file(source, target, codec, config, progress)?, false)
    };

    let report = ArchiveReport {
        transfer,
        tar_bundled,
        output: target.to_path_buf(),
        duration: start.elapsed(),
    };
    debug!(
        output = %report.output.display(),
        tar_bundled,
        elapsed_ms = report.duration.as_millis(),
        "compression complete"
    );
    Ok(report)
}

/// Extracts the archive at `archive`.
///
/// The payload name is the archive name minus its codec suffix. If the
/// payload is a tar container (`name.tar.bz2`, `name.tar.zst`), it is
/// decompressed into a temporary file, unpacked into `output_dir` (the
/// current directory by default) and the temporary file removed.
/// Otherwise the payload is written next to the archive, or into
/// `output_dir` when given.
///
/// # Errors
///
/// Returns an error if:
/// - `archive` does not end in `.bz2` or `.zst` (checked before any I/O)
/// - The archive is missing, unreadable, or malformed
/// - Writing the output fails
pub fn extract_archive(
    archive: &Path,
    output_dir: Option<&Path>,
    config: &TransferConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ArchiveReport> {
    let (codec, payload) = decompressed_path(archive)?;
    config.validate()?;
    let start = Instant::now();

    let (transfer, tar_bundled, output) = if is_tar_payload(&payload) {
        let target_dir = output_dir.unwrap_or_else(|| Path::new("."));
        let tar = TempTar::new_in(config.temp_dir.as_deref())?;
        let transfer = decompress_file(archive, tar.path(), codec, config, progress)?;
        unbundle(tar.path(), target_dir)?;
        tar.close()?;
        (transfer, true, target_dir.to_path_buf())
    } else {
        let destination = payload_destination(archive, &payload, output_dir)?;
        let transfer = decompress_file(archive, &destination, codec, config, progress)?;
        (transfer, false, destination)
    };

    let report = ArchiveReport {
        transfer,
        tar_bundled,
        output,
        duration: start.elapsed(),
    };
    debug!(
        output = %report.output.display(),
        tar_bundled,
        elapsed_ms = report.duration.as_millis(),
        "extraction complete"
    );
    Ok(report)
}

fn payload_destination(
    archive: &Path,
    payload: &Path,
    output_dir: Option<&Path>,
) -> Result<PathBuf> {
    let Some(dir) = output_dir else {
        return Ok(payload.to_path_buf());
    };

    let name = payload
        .file_name()
        .ok_or_else(|| ArchiveError::InvalidSourceName {
            path: archive.to_path_buf(),
        })?;
    fs::create_dir_all(dir)?;
    Ok(dir.join(name))
}
