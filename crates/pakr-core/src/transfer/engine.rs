//! Chunked transfer loop and the file-level compress/decompress driver.

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use tracing::debug;

use crate::ProgressCallback;
use crate::Result;
use crate::TransferConfig;
use crate::TransferReport;
use crate::formats::CompressionCodec;
use crate::io::ChunkBuffer;
use crate::io::CountingWriter;
use crate::transfer::Decoder;
use crate::transfer::Direction;
use crate::transfer::Encoder;

/// Moves every byte from `reader` to `writer` one chunk at a time.
///
/// After each chunk is written, `progress.on_progress` receives the running
/// byte count and the fixed `total`. Returns the number of bytes moved.
///
/// Nothing is retried: the first read or write error ends the loop and is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use pakr_core::NoopProgress;
/// use pakr_core::io::ChunkBuffer;
/// use pakr_core::transfer::pump;
/// use std::io::Cursor;
///
/// let mut input = Cursor::new(vec![1u8; 10]);
/// let mut output = Vec::new();
/// let mut buffer = ChunkBuffer::new(4);
///
/// let moved = pump(&mut input, &mut output, 10, &mut buffer, &mut NoopProgress)?;
/// assert_eq!(moved, 10);
/// assert_eq!(output, vec![1u8; 10]);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn pump<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
    total: u64,
    buffer: &mut ChunkBuffer,
    progress: &mut dyn ProgressCallback,
) -> std::io::Result<u64> {
    let mut done: u64 = 0;

    loop {
        let chunk = buffer.fill(reader)?;
        if chunk.is_empty() {
            break;
        }

        writer.write_all(chunk)?;
        done = done.saturating_add(chunk.len() as u64);
        progress.on_progress(done, total);
    }

    Ok(done)
}

/// Compresses or decompresses `source` into `destination`.
///
/// The progress total is the size of `source` read once before the first
/// chunk. When decompressing this is the compressed size, so the reported
/// percentage is an approximation of the real progress.
///
/// The destination is created or truncated. On failure it is left as is,
/// possibly holding partial output.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The source does not exist or cannot be read
/// - The destination cannot be created or written
/// - The compressed input is malformed (decompression)
pub fn transfer_file(
    source: &Path,
    destination: &Path,
    codec: CompressionCodec,
    direction: Direction,
    config: &TransferConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<TransferReport> {
    config.validate()?;
    let start = Instant::now();

    let total = fs::metadata(source)?.len();
    let mut report = TransferReport::new(codec, direction, total);
    let mut buffer = ChunkBuffer::new(config.effective_chunk_size());

    debug!(
        source = %source.display(),
        destination = %destination.display(),
        %codec,
        ?direction,
        total,
        chunk_size = buffer.size(),
        "starting transfer"
    );

    let input = File::open(source)?;
    let output = CountingWriter::new(File::create(destination)?);
    progress.on_start(total);

    match direction {
        Direction::Compress => {
            let mut reader = input;
            let mut encoder = Encoder::new(codec, output, config.compression_level)?;
            report.bytes_read = pump(&mut reader, &mut encoder, total, &mut buffer, progress)?;

            let mut output = encoder.finish()?;
            output.flush()?;
            report.bytes_written = output.total_bytes();
        }
        Direction::Decompress => {
            let mut decoder = Decoder::new(codec, input)?;
            let mut writer = output;
            report.bytes_read = pump(&mut decoder, &mut writer, total, &mut buffer, progress)?;

            writer.flush()?;
            report.bytes_written = writer.total_bytes();
        }
    }

    progress.on_complete();
    report.duration = start.elapsed();

    debug!(
        bytes_read = report.bytes_read,
        bytes_written = report.bytes_written,
        elapsed_ms = report.duration.as_millis(),
        "transfer finished"
    );

    Ok(report)
}

/// Compresses the file at `source` into the archive at `destination`.
///
/// See [`transfer_file`].
pub fn compress_file(
    source: &Path,
    destination: &Path,
    codec: CompressionCodec,
    config: &TransferConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<TransferReport> {
    transfer_file(
        source,
        destination,
        codec,
        Direction::Compress,
        config,
        progress,
    )
}

/// Decompresses the archive at `source` into the file at `destination`.
///
/// See [`transfer_file`].
pub fn decompress_file(
    source: &Path,
    destination: &Path,
    codec: CompressionCodec,
    config: &TransferConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<TransferReport> {
    transfer_file(
        source,
        destination,
        codec,
        Direction::Decompress,
        config,
        progress,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ArchiveError;
    use crate::NoopProgress;
    use std::io::Cursor;
    use tempfile::TempDir;

    #[derive(Debug, Default)]
    struct Recorder {
        started: Option<u64>,
        updates: Vec<(u64, u64)>,
        completed: usize,
    }

    impl ProgressCallback for Recorder {
        fn on_start(&mut self, total: u64) {
            self.started = Some(total);
        }

        fn on_progress(&mut self, done: u64, total: u64) {
            self.updates.push((done, total));
        }

        fn on_complete(&mut self) {
            self.completed += 1;
        }
    }

    fn sample_data(len: usize) -> Vec<u8> {
        (0..len).map(|i| ((i * 31) % 251) as u8).collect()
    }

    #[test]
    fn test_pump_reports_each_chunk() {
        let data = sample_data(10);
        let mut input = Cursor::new(&data);
        let mut output = Vec::new();
        let mut buffer = ChunkBuffer::new(4);
        let mut recorder = Recorder::default();

        let moved = pump(&mut input, &mut output, 10, &mut buffer, &mut recorder).unwrap();

        assert_eq!(moved, 10);
        assert_eq!(output, data);
        assert_eq!(recorder.updates, vec![(4, 10), (8, 10), (10, 10)]);
    }

    #[test]
    fn test_pump_empty_input_reports_nothing() {
        let mut input = Cursor::new(Vec::<u8>::new());
        let mut output = Vec::new();
        let mut buffer = ChunkBuffer::new(4);
        let mut recorder = Recorder::default();

        let moved = pump(&mut input, &mut output, 0, &mut buffer, &mut recorder).unwrap();

        assert_eq!(moved, 0);
        assert!(recorder.updates.is_empty());
    }

    #[test]
    fn test_pump_propagates_write_failure() {
        struct FullDisk;

        impl Write for FullDisk {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("no space left on device"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut input = Cursor::new(vec![0u8; 32]);
        let mut buffer = ChunkBuffer::new(8);
        let mut recorder = Recorder::default();

        let err = pump(&mut input, &mut FullDisk, 32, &mut buffer, &mut recorder).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::Other);
        assert!(recorder.updates.is_empty());
    }

    #[test]
    fn test_compress_then_decompress_both_codecs() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("data.bin");
        let data = sample_data(200_000);
        fs::write(&source, &data).unwrap();

        for codec in CompressionCodec::ALL {
            let archive = temp.path().join(format!("data.bin{}", codec.suffix()));
            let restored = temp.path().join(format!("restored-{codec}.bin"));
            let config = TransferConfig::default().with_chunk_size(64 * 1024);

            let report =
                compress_file(&source, &archive, codec, &config, &mut NoopProgress).unwrap();
            assert_eq!(report.total, data.len() as u64);
            assert_eq!(report.bytes_read, data.len() as u64);
            assert_eq!(report.bytes_written, fs::metadata(&archive).unwrap().len());

            let report =
                decompress_file(&archive, &restored, codec, &config, &mut NoopProgress).unwrap();
            assert_eq!(report.total, fs::metadata(&archive).unwrap().len());
            assert_eq!(report.bytes_written, data.len() as u64);

            assert_eq!(fs::read(&restored).unwrap(), data);
        }
    }

    #[test]
    fn test_compress_progress_ends_at_total() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("data.bin");
        fs::write(&source, sample_data(10_000)).unwrap();
        let archive = temp.path().join("data.bin.zst");

        let config = TransferConfig::default().with_chunk_size(3000);
        let mut recorder = Recorder::default();
        compress_file(
            &source,
            &archive,
            CompressionCodec::Zstd,
            &config,
            &mut recorder,
        )
        .unwrap();

        assert_eq!(recorder.started, Some(10_000));
        assert_eq!(
            recorder.updates,
            vec![
                (3000, 10_000),
                (6000, 10_000),
                (9000, 10_000),
                (10_000, 10_000)
            ]
        );
        assert_eq!(recorder.completed, 1);
    }

    #[test]
    fn test_missing_source_is_not_found() {
        let temp = TempDir::new().unwrap();
        let destination = temp.path().join("out.bz2");

        let err = compress_file(
            &temp.path().join("missing"),
            &destination,
            CompressionCodec::Bzip2,
            &TransferConfig::default(),
            &mut NoopProgress,
        )
        .unwrap_err();

        assert_eq!(err.io_kind(), Some(std::io::ErrorKind::NotFound));
        assert!(!destination.exists());
    }

    #[test]
    fn test_invalid_level_rejected_before_io() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("data.bin");
        fs::write(&source, b"data").unwrap();
        let destination = temp.path().join("out.zst");

        let config = TransferConfig::default().with_compression_level(0);
        let err = compress_file(
            &source,
            &destination,
            CompressionCodec::Zstd,
            &config,
            &mut NoopProgress,
        )
        .unwrap_err();

        assert!(matches!(err, ArchiveError::InvalidLevel { level: 0 }));
        assert!(!destination.exists());
    }

    #[test]
    fn test_corrupt_archive_leaves_partial_output() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("broken.bz2");
        fs::write(&archive, b"BZh9 this is not a bzip2 stream").unwrap();
        let destination = temp.path().join("broken");

        let mut recorder = Recorder::default();
        let err = decompress_file(
            &archive,
            &destination,
            CompressionCodec::Bzip2,
            &TransferConfig::default(),
            &mut recorder,
        )
        .unwrap_err();

        assert!(matches!(err, ArchiveError::Io(_)));
        assert_eq!(recorder.completed, 0);
        assert!(destination.exists());
    }
}
