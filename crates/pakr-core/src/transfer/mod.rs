//! Stream transfer engine.
//!
//! One chunked loop moves bytes between a plain side and a codec side. The
//! [`Direction`] decides which side the codec wraps:
//!
//! - **Compress**: plain file → [`Encoder`] → archive file
//! - **Decompress**: archive file → [`Decoder`] → plain file

pub mod codec;
pub mod engine;

pub use codec::Decoder;
pub use codec::Encoder;
pub use engine::compress_file;
pub use engine::decompress_file;
pub use engine::pump;
pub use engine::transfer_file;

/// Which side of a transfer the codec wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Plain source, compressed destination.
    Compress,
    /// Compressed source, plain destination.
    Decompress,
}
