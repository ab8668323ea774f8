//! Configuration for compress and extract operations.

use std::path::PathBuf;

use crate::ArchiveError;
use crate::Result;

/// Default size of each chunk moved through the codec (1 MiB).
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// Configuration for a transfer through a codec.
///
/// # Examples
///
/// ```
/// use pakr_core::TransferConfig;
///
/// let config = TransferConfig::default()
///     .with_compression_level(9)
///     .with_chunk_size(64 * 1024);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfig {
    /// Number of bytes read from the source per chunk.
    ///
    /// Progress is reported once per chunk. Values below 1 are treated as 1.
    ///
    /// Default: 1 MiB.
    pub chunk_size: usize,

    /// Compression level (1-9).
    ///
    /// `None` uses codec-specific defaults: best compression for bzip2,
    /// level 3 for zstd. Ignored when decompressing.
    ///
    /// Default: `None`.
    pub compression_level: Option<u8>,

    /// Directory for intermediate tar files.
    ///
    /// `None` uses the system temp directory.
    ///
    /// Default: `None`.
    pub temp_dir: Option<PathBuf>,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            compression_level: None,
            temp_dir: None,
        }
    }
}

impl TransferConfig {
    /// Creates a new `TransferConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the compression level.
    ///
    /// Out-of-range levels are rejected by [`validate`](Self::validate).
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Sets the directory used for intermediate tar files.
    #[must_use]
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Returns the effective chunk size (never zero).
    #[must_use]
    pub fn effective_chunk_size(&self) -> usize {
        self.chunk_size.max(1)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidLevel`] if a compression level is set
    /// outside 1-9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(ArchiveError::InvalidLevel { level });
        }
        Ok(())
    }
}
