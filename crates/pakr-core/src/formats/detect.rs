//! Codec detection from archive file names.
//!
//! Matching is exact and case-sensitive on the trailing characters of the
//! file name: `archive.bz2` is bzip2, `archive.BZ2` is unsupported.

use std::ffi::OsStr;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::Result;
use crate::formats::compression::CompressionCodec;

/// Suffix marking a tar payload inside a compressed archive.
pub const TAR_SUFFIX: &str = ".tar";

/// Detects the codec from an archive path's trailing suffix.
///
/// # Errors
///
/// Returns [`ArchiveError::UnsupportedFormat`] if the name ends in neither
/// `.bz2` nor `.zst`.
///
/// # Examples
///
/// ```
/// use pakr_core::formats::compression::CompressionCodec;
/// use pakr_core::formats::detect::detect_codec;
/// use std::path::Path;
///
/// let codec = detect_codec(Path::new("docs.tar.zst"))?;
/// assert_eq!(codec, CompressionCodec::Zstd);
/// assert!(detect_codec(Path::new("docs.tar.gz")).is_err());
/// # Ok::<(), pakr_core::ArchiveError>(())
/// ```
pub fn detect_codec(path: &Path) -> Result<CompressionCodec> {
    let name = file_name_lossy(path);
    CompressionCodec::ALL
        .into_iter()
        .find(|codec| name.ends_with(codec.suffix()))
        .ok_or_else(|| ArchiveError::UnsupportedFormat {
            path: path.to_path_buf(),
        })
}

/// Returns the path of the decompressed payload: the archive path with its
/// codec suffix removed.
///
/// # Errors
///
/// Returns [`ArchiveError::UnsupportedFormat`] if no codec suffix is present,
/// and [`ArchiveError::InvalidSourceName`] if nothing remains once the
/// suffix is removed.
pub fn decompressed_path(archive: &Path) -> Result<(CompressionCodec, PathBuf)> {
    let codec = detect_codec(archive)?;
    let stem = archive
        .file_name()
        .and_then(|name| strip_suffix(name, codec.suffix()))
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| ArchiveError::InvalidSourceName {
            path: archive.to_path_buf(),
        })?;

    Ok((codec, archive.with_file_name(stem)))
}

/// Removes an ASCII `suffix` from `name`, keeping every other byte as is.
#[cfg(unix)]
fn strip_suffix<'a>(name: &'a OsStr, suffix: &str) -> Option<&'a OsStr> {
    use std::os::unix::ffi::OsStrExt;

    name.as_bytes()
        .strip_suffix(suffix.as_bytes())
        .map(OsStr::from_bytes)
}

/// Names that are not valid Unicode cannot be split safely here and are
/// rejected rather than renamed.
#[cfg(not(unix))]
fn strip_suffix<'a>(name: &'a OsStr, suffix: &str) -> Option<&'a OsStr> {
    name.to_str()?.strip_suffix(suffix).map(OsStr::new)
}

/// Returns `true` if the payload name denotes a tar container.
#[must_use]
pub fn is_tar_payload(path: &Path) -> bool {
    file_name_lossy(path).ends_with(TAR_SUFFIX)
}

fn file_name_lossy(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map_or(std::borrow::Cow::Borrowed(""), |name| name.to_string_lossy())
}
