//! Fixed-size chunk buffer for the transfer loop.
//!
//! The buffer is allocated once per transfer and reused for every chunk,
//! so memory use stays bounded regardless of the source size.

use std::io;
use std::io::Read;

/// Reusable heap buffer holding one chunk.
///
/// # Examples
///
/// ```
/// use pakr_core::io::ChunkBuffer;
/// use std::io::Cursor;
///
/// let mut buffer = ChunkBuffer::new(4);
/// let mut input = Cursor::new(b"abcdef".to_vec());
///
/// assert_eq!(buffer.fill(&mut input)?, b"abcd");
/// assert_eq!(buffer.fill(&mut input)?, b"ef");
/// assert!(buffer.fill(&mut input)?.is_empty());
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct ChunkBuffer {
    buf: Vec<u8>,
}

impl ChunkBuffer {
    /// Creates a buffer of `size` bytes (at least one).
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            buf: vec![0u8; size.max(1)],
        }
    }

    /// Returns the chunk size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.buf.len()
    }

    /// Reads the next chunk from `reader`.
    ///
    /// Keeps reading until the buffer is full or the reader is exhausted, so
    /// every chunk except the last has exactly [`size`](Self::size) bytes.
    /// Interrupted reads are retried. An empty slice signals end of input.
    ///
    /// # Errors
    ///
    /// Propagates the reader's error unchanged; this includes decode
    /// failures when `reader` is a codec decoder.
    pub fn fill<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<&[u8]> {
        let mut filled = 0;
        while filled < self.buf.len() {
            match reader.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(&self.buf[..filled])
    }
}
