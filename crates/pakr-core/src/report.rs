//! Operation reporting and progress callbacks.

use std::path::PathBuf;
use std::time::Duration;

use crate::formats::CompressionCodec;
use crate::transfer::Direction;

/// Report of a single transfer through a codec.
///
/// # Examples
///
/// ```
/// use pakr_core::TransferReport;
/// use pakr_core::formats::CompressionCodec;
/// use pakr_core::transfer::Direction;
///
/// let mut report = TransferReport::new(CompressionCodec::Zstd, Direction::Compress, 1000);
/// report.bytes_read = 1000;
/// report.bytes_written = 250;
///
/// assert_eq!(report.compression_ratio(), 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct TransferReport {
    /// Codec used for the transfer.
    pub codec: CompressionCodec,

    /// Whether the codec wrapped the destination or the source.
    pub direction: Direction,

    /// Size of the source file when the transfer started.
    ///
    /// For decompression this is the compressed size, so progress
    /// percentages are an approximation.
    pub total: u64,

    /// Bytes moved through the chunk loop (plain bytes in both directions).
    pub bytes_read: u64,

    /// Bytes written to the destination file.
    pub bytes_written: u64,

    /// Duration of the transfer.
    pub duration: Duration,
}

impl TransferReport {
    /// Creates an empty report for a transfer about to start.
    #[must_use]
    pub fn new(codec: CompressionCodec, direction: Direction, total: u64) -> Self {
        Self {
            codec,
            direction,
            total,
            bytes_read: 0,
            bytes_written: 0,
            duration: Duration::ZERO,
        }
    }

    /// Returns the plain-to-compressed size ratio.
    ///
    /// Returns `0.0` when the compressed side is empty.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        let (plain, compressed) = match self.direction {
            Direction::Compress => (self.bytes_read, self.bytes_written),
            Direction::Decompress => (self.bytes_written, self.total),
        };
        if compressed == 0 {
            return 0.0;
        }
        plain as f64 / compressed as f64
    }
}

/// Report of a full compress or extract operation.
#[derive(Debug, Clone)]
pub struct ArchiveReport {
    /// The codec transfer performed.
    pub transfer: TransferReport,

    /// Whether a directory was bundled before compression, or a tar payload
    /// unpacked after decompression.
    pub tar_bundled: bool,

    /// Final output: the archive when compressing, the decompressed file or
    /// unpack directory when extracting.
    pub output: PathBuf,

    /// Duration of the whole operation, bundling included.
    pub duration: Duration,
}

/// Callback trait for progress reporting during a transfer.
///
/// The engine calls `on_start` once, `on_progress` after every chunk with
/// the running byte count, and `on_complete` once after the last chunk has
/// been written.
///
/// # Examples
///
/// ```
/// use pakr_core::ProgressCallback;
///
/// struct PercentLog;
///
/// impl ProgressCallback for PercentLog {
///     fn on_start(&mut self, total: u64) {
///         println!("transferring {total} bytes");
///     }
///
///     fn on_progress(&mut self, done: u64, total: u64) {
///         println!("{done}/{total}");
///     }
///
///     fn on_complete(&mut self) {
///         println!("done");
///     }
/// }
/// ```
pub trait ProgressCallback {
    /// Called once before the first chunk.
    fn on_start(&mut self, total: u64);

    /// Called after each chunk is written.
    ///
    /// # Arguments
    ///
    /// * `done` - Bytes transferred so far (non-decreasing)
    /// * `total` - Source size captured at the start of the transfer
    fn on_progress(&mut self, done: u64, total: u64);

    /// Called once after the transfer finished successfully.
    fn on_complete(&mut self);
}

/// No-op implementation of `ProgressCallback`, used when progress display
/// is disabled.
#[derive(Debug, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_start(&mut self, _total: u64) {}

    fn on_progress(&mut self, _done: u64, _total: u64) {}

    fn on_complete(&mut self) {}
}
