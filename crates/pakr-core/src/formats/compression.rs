//! Compression codecs and level conversion.
//!
//! User levels follow one scale for every codec:
//!
//! - **1-3**: Fast compression (lower CPU usage, larger files)
//! - **7-9**: Best compression (higher CPU usage, smaller files)
//!
//! Each codec maps these levels to its own internal scale.

/// Compression codec applied to an archive stream.
///
/// # Examples
///
/// ```
/// use pakr_core::formats::compression::CompressionCodec;
///
/// assert_eq!(CompressionCodec::Bzip2.extension(), "bz2");
/// assert_eq!(CompressionCodec::Zstd.suffix(), ".zst");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Bzip2 compression (Burrows-Wheeler algorithm).
    Bzip2,

    /// Zstd compression (Zstandard algorithm).
    Zstd,
}

impl CompressionCodec {
    /// All supported codecs, in suffix-matching order.
    pub const ALL: [Self; 2] = [Self::Bzip2, Self::Zstd];

    /// Returns the file extension for this codec, without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Bzip2 => "bz2",
            Self::Zstd => "zst",
        }
    }

    /// Returns the file name suffix for this codec, including the dot.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Bzip2 => ".bz2",
            Self::Zstd => ".zst",
        }
    }

    /// Returns a human-readable name for this codec.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bzip2 => "bzip2",
            Self::Zstd => "zstd",
        }
    }
}

impl std::fmt::Display for CompressionCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Converts user compression level (1-9) to bzip2 compression level.
///
/// # Mapping
///
/// - `None` or `Some(9)`: Best compression, the classic `bzip2` default
/// - `1`: Fast compression
/// - `2-8`: Literal level
///
/// # Examples
///
/// ```
/// use pakr_core::formats::compression::compression_level_to_bzip2;
///
/// assert_eq!(compression_level_to_bzip2(None), bzip2::Compression::best());
/// assert_eq!(compression_level_to_bzip2(Some(1)), bzip2::Compression::fast());
/// ```
#[must_use]
pub fn compression_level_to_bzip2(level: Option<u8>) -> bzip2::Compression {
    match level {
        None | Some(9..) => bzip2::Compression::best(),
        Some(0 | 1) => bzip2::Compression::fast(),
        Some(n) => bzip2::Compression::new(u32::from(n)),
    }
}

/// Converts user compression level (1-9) to zstd compression level.
///
/// Zstd has a wider range (1-22) than the user scale (1-9):
///
/// - `None` or `3-6`: Level 3 (zstd default)
/// - `1`: Level 1 (fastest)
/// - `2`: Level 2
/// - `7`: Level 10
/// - `8`: Level 15
/// - `9`: Level 19
///
/// # Examples
///
/// ```
/// use pakr_core::formats::compression::compression_level_to_zstd;
///
/// assert_eq!(compression_level_to_zstd(None), 3);
/// assert_eq!(compression_level_to_zstd(Some(9)), 19);
/// ```
#[allow(clippy::match_same_arms)]
#[must_use]
pub fn compression_level_to_zstd(level: Option<u8>) -> i32 {
    match level {
        Some(1) => 1,
        Some(2) => 2,
        Some(7) => 10,
        Some(8) => 15,
        Some(9) => 19,
        _ => 3,
    }
}
