use std::io;
use std::path::{Path, PathBuf};

/// Directory entry returned by [`FileSystem::read_dir`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsEntry {
    /// Base name (no parent path).
    pub name: String,
    /// Whether this entry is (or links to) a directory.
    pub is_dir: bool,
}

/// Filesystem collaborator used by the picker.
///
/// Every call blocks the caller; the picker never retries or cancels.
pub trait FileSystem {
    /// List the children of `dir`.
    ///
    /// The outer error means the directory itself could not be opened. An
    /// inner error means one child could not be read or classified; the
    /// remaining children are still reported.
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<io::Result<FsEntry>>>;
    /// Resolve `path` to an absolute path without `.`/`..` or symlinks.
    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
    /// Whether `path` is a directory. A missing path is `Ok(false)`.
    fn is_dir(&self, path: &Path) -> io::Result<bool>;
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> io::Result<bool>;
    /// Create an empty regular file. Fails if `path` already exists.
    fn create_file(&self, path: &Path) -> io::Result<()>;
    /// Create a directory.
    fn create_dir(&self, path: &Path) -> io::Result<()>;
    /// Rename/move a path. Implementations may replace an existing `to`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
    /// Remove a file, or a directory with all of its contents.
    fn remove_all(&self, path: &Path) -> io::Result<()>;
}

/// Default filesystem implementation using `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_dir(&self, dir: &Path) -> io::Result<Vec<io::Result<FsEntry>>> {
        let rd = std::fs::read_dir(dir)?;
        Ok(rd
            .map(|e| {
                let e = e?;
                let path = e.path();
                let name = e.file_name().to_string_lossy().to_string();
                // Follow symlinks so links to directories are navigable.
                let is_dir = match std::fs::metadata(&path) {
                    Ok(md) => md.is_dir(),
                    Err(err) if err.kind() == io::ErrorKind::NotFound => {
                        // Dangling symlink: list it as a plain file.
                        std::fs::symlink_metadata(&path)?;
                        false
                    }
                    Err(err) => return Err(err),
                };
                Ok(FsEntry { name, is_dir })
            })
            .collect())
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
        std::fs::canonicalize(path)
    }

    fn is_dir(&self, path: &Path) -> io::Result<bool> {
        match std::fs::metadata(path) {
            Ok(md) => Ok(md.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }

    fn create_file(&self, path: &Path) -> io::Result<()> {
        std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map(|_| ())
    }

    fn create_dir(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir(path)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        let md = std::fs::symlink_metadata(path)?;
        if md.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        }
    }
}
