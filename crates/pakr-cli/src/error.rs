//! Error conversion utilities for CLI.
//!
//! Converts pakr-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use pakr_core::ArchiveError;
use std::io;
use std::path::Path;

/// Converts `ArchiveError` to user-friendly anyhow error with context
pub fn convert_archive_error(err: ArchiveError, subject: &Path) -> anyhow::Error {
    match err {
        ArchiveError::UnsupportedFormat { path } => {
            anyhow!(
                "Unsupported archive format: {}\n\
                 HINT: Archive names must end in .bz2 (bzip2) or .zst (zstd); \
                 use NAME.tar.bz2 or NAME.tar.zst for directories.",
                path.display()
            )
        }
        ArchiveError::MissingTarget => {
            anyhow!(
                "No target archive specified for '{}'\n\
                 HINT: Pass TARGET after SOURCE, or use -x to extract SOURCE.",
                subject.display()
            )
        }
        ArchiveError::InvalidLevel { level } => {
            anyhow!(
                "Invalid compression level {level}\n\
                 HINT: Use a level between 1 (fastest) and 9 (smallest)."
            )
        }
        ArchiveError::NotADirectory { path } => {
            anyhow!("Expected a directory: {}", path.display())
        }
        ArchiveError::InvalidSourceName { path } => {
            anyhow!(
                "Cannot derive an entry name from '{}'\n\
                 HINT: Name the directory explicitly instead of using a root path.",
                path.display()
            )
        }
        ArchiveError::Io(io_err) if is_decode_failure(&io_err) => {
            anyhow!(
                "Failed to decode '{}': {}\n\
                 HINT: The archive may be corrupted, truncated, or use a different codec.",
                subject.display(),
                io_err
            )
        }
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                subject.display(),
                io_err
            )
        }
    }
}

/// Decoders surface malformed input through these kinds.
fn is_decode_failure(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::InvalidData | io::ErrorKind::InvalidInput | io::ErrorKind::UnexpectedEof
    )
}

/// Adds context to a core result about the path being processed
pub fn add_path_context<T>(
    result: Result<T, ArchiveError>,
    subject: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, subject))
}

/// Adds context naming both ends of a transfer.
///
/// Plain I/O failures may come from reading `source` or writing
/// `destination`, so the message names both. Other errors are converted
/// as by [`add_path_context`].
pub fn add_transfer_context<T>(
    result: Result<T, ArchiveError>,
    source: &Path,
    destination: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| match e {
        ArchiveError::Io(io_err) if !is_decode_failure(&io_err) => anyhow!(
            "I/O error while processing '{}' -> '{}': {}",
            source.display(),
            destination.display(),
            io_err
        ),
        other => convert_archive_error(other, source),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_convert_unsupported_format() {
        let err = ArchiveError::UnsupportedFormat {
            path: PathBuf::from("backup.gz"),
        };
        let msg = format!("{:?}", convert_archive_error(err, Path::new("docs")));
        assert!(msg.contains("Unsupported archive format"));
        assert!(msg.contains("backup.gz"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_invalid_level() {
        let err = ArchiveError::InvalidLevel { level: 12 };
        let msg = format!("{:?}", convert_archive_error(err, Path::new("a.txt")));
        assert!(msg.contains("level 12"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_decode_error() {
        let err = ArchiveError::Io(io::Error::new(io::ErrorKind::InvalidData, "bad magic"));
        let msg = format!("{:?}", convert_archive_error(err, Path::new("junk.bz2")));
        assert!(msg.contains("Failed to decode 'junk.bz2'"));
        assert!(msg.contains("bad magic"));
    }

    #[test]
    fn test_convert_io_error() {
        let err = ArchiveError::Io(io::Error::new(io::ErrorKind::NotFound, "file not found"));
        let msg = format!("{:?}", convert_archive_error(err, Path::new("missing.txt")));
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("missing.txt"));
        assert!(!msg.contains("HINT"));
    }

    #[test]
    fn test_transfer_context_names_destination() {
        let result: Result<(), ArchiveError> = Err(ArchiveError::Io(io::Error::new(
            io::ErrorKind::NotFound,
            "No such file or directory",
        )));
        let msg = format!(
            "{:?}",
            add_transfer_context(result, Path::new("a.txt"), Path::new("out/a.txt.bz2"))
                .unwrap_err()
        );
        assert!(msg.contains("'a.txt' -> 'out/a.txt.bz2'"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn test_transfer_context_decode_names_archive() {
        let result: Result<(), ArchiveError> = Err(ArchiveError::Io(io::Error::new(
            io::ErrorKind::InvalidData,
            "bad magic",
        )));
        let msg = format!(
            "{:?}",
            add_transfer_context(result, Path::new("junk.zst"), Path::new("junk")).unwrap_err()
        );
        assert!(msg.contains("Failed to decode 'junk.zst'"));
        assert!(!msg.contains("-> 'junk'"));
    }

    #[test]
    fn test_add_path_context_passes_ok() {
        let result: Result<u8, ArchiveError> = Ok(3);
        assert_eq!(add_path_context(result, Path::new("x")).ok(), Some(3));
    }
}
