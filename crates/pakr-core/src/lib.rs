//! Streaming bzip2/zstd compression for files and directories.
//!
//! `pakr-core` compresses a single file or a whole directory into a `.bz2`
//! or `.zst` archive and extracts it again. Directories go through an
//! intermediate tar container (`name.tar.bz2`, `name.tar.zst`). Data moves
//! in fixed-size chunks so memory stays bounded, and an optional
//! [`ProgressCallback`] is notified after every chunk.
//!
//! # Examples
//!
//! ```no_run
//! use pakr_core::NoopProgress;
//! use pakr_core::TransferConfig;
//! use pakr_core::compress_path;
//! use pakr_core::extract_archive;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TransferConfig::default();
//! compress_path(Path::new("docs"), Path::new("docs.tar.zst"), &config, &mut NoopProgress)?;
//! extract_archive(Path::new("docs.tar.zst"), Some(Path::new("restored")), &config, &mut NoopProgress)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod bundle;
pub mod config;
pub mod error;
pub mod formats;
pub mod io;
pub mod progress;
pub mod report;
pub mod transfer;

// Re-export main API types
pub use api::Operation;
pub use api::compress_path;
pub use api::extract_archive;
pub use config::TransferConfig;
pub use error::ArchiveError;
pub use error::Result;
pub use formats::CompressionCodec;
pub use progress::LineProgress;
pub use progress::render_bar;
pub use report::ArchiveReport;
pub use report::NoopProgress;
pub use report::ProgressCallback;
pub use report::TransferReport;
pub use transfer::Direction;
