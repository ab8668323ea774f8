//! Tar bundling of directories.
//!
//! A directory is packed into an uncompressed tar file in the system temp
//! directory before it goes through a codec, and a decompressed tar payload
//! is unpacked back into a directory tree. Neither step reports progress.
//!
//! # Trust boundary
//!
//! [`unbundle`] relies on the `tar` crate's unpack rules only: entries
//! containing `..` are skipped, but nothing else is validated. Only unpack
//! archives from trusted sources.

use std::fs;
use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::BufWriter;
use std::path::Path;
use std::path::PathBuf;

use tempfile::TempPath;
use tracing::info;
use tracing::warn;

use crate::ArchiveError;
use crate::Result;
use crate::formats::detect::TAR_SUFFIX;

const TEMP_PREFIX: &str = "pakr-";

/// Owned temporary tar file.
///
/// The file is deleted when the handle is dropped, so it never outlives the
/// operation that created it, whether that operation succeeds or fails.
/// Use [`close`](Self::close) to delete it explicitly and observe errors.
#[derive(Debug)]
pub struct TempTar {
    path: TempPath,
}

impl TempTar {
    /// Creates a new, empty, uniquely-named `.tar` file in the system temp
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp file cannot be created.
    pub fn new() -> Result<Self> {
        Self::new_in(None)
    }

    /// Creates the temp file in `dir`, or in the system temp directory when
    /// `dir` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the temp file cannot be created.
    pub fn new_in(dir: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(TAR_SUFFIX);
        let file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        Ok(Self {
            path: file.into_temp_path(),
        })
    }

    /// Returns the location of the temp file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the temp file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    pub fn close(self) -> Result<()> {
        let path = self.path.to_path_buf();
        if let Err(err) = self.path.close() {
            warn!(path = %path.display(), error = %err, "failed to remove temporary tar");
            return Err(err.into());
        }
        info!(path = %path.display(), "removed temporary tar");
        Ok(())
    }
}

impl AsRef<Path> for TempTar {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

/// Packs `source_dir` into a new temporary tar file.
///
/// The archive holds a single top-level entry named after the directory
/// itself, so `/home/user/docs` is stored as `docs/...` without the leading
/// path. Symlinks are stored as links, not followed.
///
/// # Errors
///
/// Returns an error if:
/// - `source_dir` does not exist or is not a directory
/// - The directory has no usable name (e.g. `/`)
/// - Reading the tree or writing the temp file fails
///
/// # Examples
///
/// ```no_run
/// use pakr_core::bundle::bundle;
/// use std::path::Path;
///
/// let tar = bundle(Path::new("docs"))?;
/// println!("bundled into {}", tar.path().display());
/// tar.close()?;
/// # Ok::<(), pakr_core::ArchiveError>(())
/// ```
pub fn bundle(source_dir: &Path) -> Result<TempTar> {
    bundle_in(source_dir, None)
}

/// Like [`bundle`], but creates the temp file in `temp_dir` when given.
///
/// # Errors
///
/// See [`bundle`].
pub fn bundle_in(source_dir: &Path, temp_dir: Option<&Path>) -> Result<TempTar> {
    if !fs::metadata(source_dir)?.is_dir() {
        return Err(ArchiveError::NotADirectory {
            path: source_dir.to_path_buf(),
        });
    }
    let name = entry_name(source_dir)?;

    let temp = TempTar::new_in(temp_dir)?;
    let file = File::create(temp.path())?;

    let mut builder = tar::Builder::new(BufWriter::new(file));
    builder.follow_symlinks(false);
    builder.append_dir_all(&name, source_dir)?;
    builder
        .into_inner()?
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;

    info!(
        source = %source_dir.display(),
        entry = %name.display(),
        tar = %temp.path().display(),
        "bundled directory"
    );
    Ok(temp)
}

/// Unpacks the tar file at `tar_path` into `target_dir`.
///
/// `target_dir` is created if missing. Relative structure stored in the
/// archive is preserved; existing files are overwritten.
///
/// # Errors
///
/// Returns an error if the tar file cannot be read or is malformed, or if
/// writing into `target_dir` fails.
pub fn unbundle(tar_path: &Path, target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir)?;

    let file = File::open(tar_path)?;
    let mut archive = tar::Archive::new(BufReader::new(file));
    archive.set_overwrite(true);
    archive.unpack(target_dir)?;

    info!(
        tar = %tar_path.display(),
        target = %target_dir.display(),
        "unpacked tar payload"
    );
    Ok(())
}

/// Returns the name the directory is stored under: its own base name,
/// resolving `.`, `..` and similar through the filesystem.
fn entry_name(dir: &Path) -> Result<PathBuf> {
    if let Some(name) = dir.file_name() {
        return Ok(PathBuf::from(name));
    }

    dir.canonicalize()?
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| ArchiveError::InvalidSourceName {
            path: dir.to_path_buf(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_tree(root: &Path) -> PathBuf {
        let docs = root.join("docs");
        fs::create_dir_all(docs.join("sub")).unwrap();
        fs::write(docs.join("a.txt"), b"alpha").unwrap();
        fs::write(docs.join("sub/b.txt"), b"beta").unwrap();
        docs
    }

    fn entry_paths(tar_path: &Path) -> Vec<String> {
        let mut archive = tar::Archive::new(File::open(tar_path).unwrap());
        archive
            .entries()
            .unwrap()
            .map(|e| {
                e.unwrap()
                    .path()
                    .unwrap()
                    .to_string_lossy()
                    .trim_end_matches('/')
                    .to_string()
            })
            .collect()
    }

    #[test]
    fn test_bundle_uses_base_name() {
        let temp = TempDir::new().unwrap();
        let docs = make_tree(temp.path());

        let tar = bundle(&docs).unwrap();
        let paths = entry_paths(tar.path());

        assert!(paths.contains(&"docs".to_string()));
        assert!(paths.contains(&"docs/a.txt".to_string()));
        assert!(paths.contains(&"docs/sub/b.txt".to_string()));
        assert!(paths.iter().all(|p| p.starts_with("docs")));
    }

    #[test]
    fn test_bundle_trailing_slash_and_dot() {
        let temp = TempDir::new().unwrap();
        let docs = make_tree(temp.path());

        let with_slash = PathBuf::from(format!("{}/", docs.display()));
        let tar = bundle(&with_slash).unwrap();
        assert!(entry_paths(tar.path()).contains(&"docs/a.txt".to_string()));

        let with_dot = docs.join("sub").join("..");
        let tar = bundle(&with_dot).unwrap();
        assert!(entry_paths(tar.path()).contains(&"docs/a.txt".to_string()));
    }

    #[test]
    fn test_bundle_rejects_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain.txt");
        fs::write(&file, b"x").unwrap();

        assert!(matches!(
            bundle(&file),
            Err(ArchiveError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_bundle_missing_source() {
        let temp = TempDir::new().unwrap();
        let err = bundle(&temp.path().join("missing")).unwrap_err();
        assert_eq!(err.io_kind(), Some(io::ErrorKind::NotFound));
    }

    #[test]
    fn test_temp_tar_removed_on_drop() {
        let temp = TempDir::new().unwrap();
        let docs = make_tree(temp.path());

        let tar = bundle(&docs).unwrap();
        let path = tar.path().to_path_buf();
        assert!(path.exists());
        assert!(path.to_string_lossy().ends_with(".tar"));

        drop(tar);
        assert!(!path.exists());
    }

    #[test]
    fn test_bundle_in_custom_dir() {
        let temp = TempDir::new().unwrap();
        let docs = make_tree(temp.path());
        let scratch = temp.path().join("scratch");
        fs::create_dir(&scratch).unwrap();

        let tar = bundle_in(&docs, Some(&scratch)).unwrap();
        assert_eq!(tar.path().parent(), Some(scratch.as_path()));
        let name = tar.path().file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("pakr-") && name.ends_with(".tar"));

        drop(tar);
        assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[test]
    fn test_temp_tar_close() {
        let tar = TempTar::new().unwrap();
        let path = tar.path().to_path_buf();
        assert!(path.exists());

        tar.close().unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_unbundle_restores_tree() {
        let temp = TempDir::new().unwrap();
        let docs = make_tree(temp.path());
        let tar = bundle(&docs).unwrap();

        let out = temp.path().join("out/nested");
        unbundle(tar.path(), &out).unwrap();

        assert_eq!(fs::read(out.join("docs/a.txt")).unwrap(), b"alpha");
        assert_eq!(fs::read(out.join("docs/sub/b.txt")).unwrap(), b"beta");
    }

    #[test]
    fn test_unbundle_malformed_tar() {
        let temp = TempDir::new().unwrap();
        let bogus = temp.path().join("bogus.tar");
        fs::write(&bogus, vec![0x41u8; 1024]).unwrap();

        assert!(unbundle(&bogus, &temp.path().join("out")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_bundle_keeps_symlinks() {
        let temp = TempDir::new().unwrap();
        let docs = make_tree(temp.path());
        std::os::unix::fs::symlink("a.txt", docs.join("link")).unwrap();

        let tar = bundle(&docs).unwrap();
        let mut archive = tar::Archive::new(File::open(tar.path()).unwrap());
        let link = archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap())
            .find(|e| e.path().unwrap().ends_with("link"))
            .unwrap();

        assert!(link.header().entry_type().is_symlink());
        assert_eq!(
            link.link_name().unwrap().unwrap().to_string_lossy(),
            "a.txt"
        );
    }
}
