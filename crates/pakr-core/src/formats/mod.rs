//! Codec definitions and archive name handling.

pub mod compression;
pub mod detect;

pub use compression::CompressionCodec;
pub use detect::decompressed_path;
pub use detect::detect_codec;
pub use detect::is_tar_payload;
