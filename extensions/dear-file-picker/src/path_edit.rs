use std::path::{Component, Path, PathBuf};

use crate::core::PickerError;
use crate::fs::FileSystem;

/// One clickable segment of the working-directory path bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Breadcrumb {
    /// Text shown on the button.
    pub label: String,
    /// Directory navigated to when the segment is clicked.
    pub target: PathBuf,
}

/// Split `dir` into breadcrumbs; segment `k` targets components `0..=k`.
///
/// A Windows drive prefix and the root separator after it form a single
/// segment (`C:` targeting `C:\`).
pub fn breadcrumbs(dir: &Path) -> Vec<Breadcrumb> {
    let mut out: Vec<Breadcrumb> = Vec::new();
    let mut acc = PathBuf::new();
    let mut after_prefix = false;
    for comp in dir.components() {
        acc.push(comp.as_os_str());
        match comp {
            Component::RootDir if after_prefix => {
                if let Some(last) = out.last_mut() {
                    last.target = acc.clone();
                }
            }
            _ => out.push(Breadcrumb {
                label: comp.as_os_str().to_string_lossy().to_string(),
                target: acc.clone(),
            }),
        }
        after_prefix = matches!(comp, Component::Prefix(_));
    }
    out
}

/// Parent of `dir`, or `None` at a filesystem root.
pub fn parent_of(dir: &Path) -> Option<PathBuf> {
    dir.parent().map(Path::to_path_buf)
}

/// Resolve text typed into the path editor to a directory.
///
/// One trailing separator is ignored and relative input is taken relative
/// to `working_dir`. When the text itself is not a directory its parent is
/// tried; an I/O error on either candidate stops the search.
pub fn resolve_typed_directory(
    fs: &dyn FileSystem,
    working_dir: &Path,
    text: &str,
) -> Result<PathBuf, PickerError> {
    let text = strip_trailing_separator(text);
    let typed = working_dir.join(text);

    let mut candidates = vec![typed.clone()];
    if let Some(parent) = typed.parent() {
        candidates.push(parent.to_path_buf());
    }

    for candidate in candidates {
        match fs.is_dir(&candidate) {
            Ok(true) => return Ok(candidate),
            Ok(false) => {}
            Err(source) => {
                return Err(PickerError::Resolve {
                    path: candidate.display().to_string(),
                    source,
                });
            }
        }
    }
    Err(PickerError::NotADirectory(text.to_string()))
}

fn strip_trailing_separator(text: &str) -> &str {
    match text.strip_suffix(['/', '\\']) {
        // Keep roots (`/`, `C:\`) intact.
        Some(rest) if !rest.is_empty() && !rest.ends_with(':') => rest,
        _ => text,
    }
}
