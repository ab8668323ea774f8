//! Error types for archive operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while compressing or extracting.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    ///
    /// Covers filesystem failures (missing source, permissions, disk full)
    /// as well as codec decode failures, which the `bzip2` and `zstd`
    /// readers surface as I/O errors.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive name does not end in a supported codec suffix.
    #[error("unsupported archive format: {path} (expected .bz2 or .zst)")]
    UnsupportedFormat {
        /// The offending archive path.
        path: PathBuf,
    },

    /// Compression was requested without a target archive path.
    #[error("no target archive specified")]
    MissingTarget,

    /// Compression level outside the 1-9 scale.
    #[error("invalid compression level {level} (expected 1-9)")]
    InvalidLevel {
        /// The rejected level.
        level: u8,
    },

    /// A directory was expected but the path is something else.
    #[error("not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// The path has no usable file name component.
    #[error("cannot derive a name from path: {path}")]
    InvalidSourceName {
        /// The offending path.
        path: PathBuf,
    },
}

impl ArchiveError {
    /// Returns `true` if this error was raised while validating arguments,
    /// before any file was read or written.
    ///
    /// # Examples
    ///
    /// ```
    /// use pakr_core::ArchiveError;
    /// use std::path::PathBuf;
    ///
    /// let err = ArchiveError::UnsupportedFormat {
    ///     path: PathBuf::from("out.gz"),
    /// };
    /// assert!(err.is_config_error());
    ///
    /// let err = ArchiveError::Io(std::io::Error::other("disk full"));
    /// assert!(!err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. } | Self::MissingTarget | Self::InvalidLevel { .. }
        )
    }

    /// Returns the underlying I/O error kind, if this is an I/O error.
    #[must_use]
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            Self::Io(err) => Some(err.kind()),
            _ => None,
        }
    }
}
