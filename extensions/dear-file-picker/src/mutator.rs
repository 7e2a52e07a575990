use std::io;
use std::path::Path;

use crate::core::{EntryKind, PickerError};
use crate::fs::FileSystem;

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

/// Validate and normalize a user-supplied entry name.
///
/// The name is trimmed. Empty names, `.`/`..`, and names containing a path
/// separator or NUL are rejected.
pub fn validate_name(raw: &str) -> Result<String, PickerError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(PickerError::EmptyName);
    }
    if name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(PickerError::InvalidName(name.to_string()));
    }
    Ok(name.to_string())
}

/// Create/rename/delete children of one directory.
///
/// Borrowed for the duration of a single operation; the caller owns rescans.
pub struct Mutator<'a> {
    fs: &'a dyn FileSystem,
    dir: &'a Path,
}

impl<'a> Mutator<'a> {
    /// Operate on children of `dir`.
    pub fn new(fs: &'a dyn FileSystem, dir: &'a Path) -> Self {
        Self { fs, dir }
    }

    /// Create an empty file or directory named `name`.
    ///
    /// Returns the validated name. Nothing touches the filesystem when the
    /// name is rejected.
    pub fn create(&self, kind: EntryKind, name: &str) -> Result<String, PickerError> {
        let name = validate_name(name)?;
        let path = self.dir.join(&name);
        let res = match kind {
            EntryKind::File => self.fs.create_file(&path),
            EntryKind::Directory => self.fs.create_dir(&path),
        };
        match res {
            Ok(()) => {
                trace_created(kind, &path);
                Ok(name)
            }
            Err(source) => Err(PickerError::Create { kind, name, source }),
        }
    }

    /// Rename child `old_name` to `new_name`. Returns the validated new name.
    ///
    /// An existing `new_name` is never replaced. Names differing only by
    /// ASCII case skip that check so case-only renames still work.
    pub fn rename(
        &self,
        kind: EntryKind,
        old_name: &str,
        new_name: &str,
    ) -> Result<String, PickerError> {
        let new_name = validate_name(new_name)?;
        let from = self.dir.join(old_name);
        let to = self.dir.join(&new_name);
        let rename_err = |source| PickerError::Rename {
            from: old_name.to_string(),
            to: new_name.clone(),
            source,
        };
        if !new_name.eq_ignore_ascii_case(old_name) {
            match self.fs.exists(&to) {
                Ok(false) => {}
                Ok(true) => {
                    return Err(rename_err(io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        "entry exists",
                    )));
                }
                Err(source) => return Err(rename_err(source)),
            }
        }
        match self.fs.rename(&from, &to) {
            Ok(()) => {
                trace_renamed(kind, old_name, &new_name);
                Ok(new_name)
            }
            Err(source) => Err(rename_err(source)),
        }
    }

    /// Recursively remove every named child, continuing past failures.
    ///
    /// All failures are reported together in one [`PickerError::Delete`].
    pub fn delete_batch<I, S>(&self, names: I) -> Result<(), PickerError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut failures = Vec::new();
        for name in names {
            let name = name.as_ref();
            let path = self.dir.join(name);
            if let Err(err) = self.fs.remove_all(&path) {
                trace_delete_failed(&path, &err);
                failures.push((name.to_string(), err));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(PickerError::Delete { failures })
        }
    }
}

#[cfg(feature = "tracing")]
fn trace_created(kind: EntryKind, path: &Path) {
    debug!(
        event = "mutator.created",
        kind = kind.noun(),
        path = %path.display(),
        "entry created"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_created(_kind: EntryKind, _path: &Path) {}

#[cfg(feature = "tracing")]
fn trace_renamed(kind: EntryKind, from: &str, to: &str) {
    debug!(
        event = "mutator.renamed",
        kind = kind.noun(),
        from,
        to,
        "entry renamed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_renamed(_kind: EntryKind, _from: &str, _to: &str) {}

#[cfg(feature = "tracing")]
fn trace_delete_failed(path: &Path, err: &io::Error) {
    warn!(
        event = "mutator.delete_failed",
        path = %path.display(),
        error = %err,
        "delete failed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_delete_failed(_path: &Path, _err: &io::Error) {}
