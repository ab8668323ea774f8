//! Codec stream wrappers.
//!
//! Compression wraps the destination side in an [`Encoder`]; decompression
//! wraps the source side in a [`Decoder`]. The transfer loop only sees
//! `Write` and `Read`, so one loop serves both codecs in both directions.

use std::io;
use std::io::BufReader;
use std::io::Read;
use std::io::Write;

use crate::formats::CompressionCodec;
use crate::formats::compression::compression_level_to_bzip2;
use crate::formats::compression::compression_level_to_zstd;

/// Compressing writer for one of the supported codecs.
pub enum Encoder<W: Write> {
    /// Bzip2 stream encoder.
    Bzip2(bzip2::write::BzEncoder<W>),
    /// Zstd frame encoder.
    Zstd(zstd::stream::write::Encoder<'static, W>),
}

impl<W: Write> Encoder<W> {
    /// Wraps `inner` in an encoder for `codec` at the given user level (1-9).
    ///
    /// Zstd frames carry a content checksum.
    ///
    /// # Errors
    ///
    /// Returns an error if the zstd context cannot be initialized.
    pub fn new(codec: CompressionCodec, inner: W, level: Option<u8>) -> io::Result<Self> {
        match codec {
            CompressionCodec::Bzip2 => Ok(Self::Bzip2(bzip2::write::BzEncoder::new(
                inner,
                compression_level_to_bzip2(level),
            ))),
            CompressionCodec::Zstd => {
                let mut encoder =
                    zstd::stream::write::Encoder::new(inner, compression_level_to_zstd(level))?;
                encoder.include_checksum(true)?;
                Ok(Self::Zstd(encoder))
            }
        }
    }

    /// Writes the stream trailer and returns the inner writer.
    ///
    /// Must be called for the archive to be complete: dropping an encoder
    /// without finishing it leaves a truncated zstd frame.
    ///
    /// # Errors
    ///
    /// Returns an error if flushing the remaining compressed data fails.
    pub fn finish(self) -> io::Result<W> {
        match self {
            Self::Bzip2(encoder) => encoder.finish(),
            Self::Zstd(encoder) => encoder.finish(),
        }
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Bzip2(encoder) => encoder.write(buf),
            Self::Zstd(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Bzip2(encoder) => encoder.flush(),
            Self::Zstd(encoder) => encoder.flush(),
        }
    }
}

/// Decompressing reader for one of the supported codecs.
///
/// Both variants read every concatenated stream or frame in the input, the
/// way the `bzip2` and `zstd` command-line tools do.
pub enum Decoder<R: Read> {
    /// Multi-stream bzip2 decoder.
    Bzip2(bzip2::read::MultiBzDecoder<R>),
    /// Zstd frame decoder.
    Zstd(zstd::stream::read::Decoder<'static, BufReader<R>>),
}

impl<R: Read> Decoder<R> {
    /// Wraps `inner` in a decoder for `codec`.
    ///
    /// # Errors
    ///
    /// Returns an error if the zstd context cannot be initialized.
    pub fn new(codec: CompressionCodec, inner: R) -> io::Result<Self> {
        match codec {
            CompressionCodec::Bzip2 => Ok(Self::Bzip2(bzip2::read::MultiBzDecoder::new(inner))),
            CompressionCodec::Zstd => Ok(Self::Zstd(zstd::stream::read::Decoder::new(inner)?)),
        }
    }
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Bzip2(decoder) => decoder.read(buf),
            Self::Zstd(decoder) => decoder.read(buf),
        }
    }
}
