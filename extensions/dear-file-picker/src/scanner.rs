use std::cmp::Ordering;
use std::path::Path;

use crate::core::PickerError;
use crate::fs::FileSystem;

#[cfg(feature = "tracing")]
use tracing::{trace, warn};

/// Name of the synthetic parent-navigation entry.
pub const PARENT_NAME: &str = "..";
/// Name given to entries whose classification failed.
pub const PLACEHOLDER_NAME: &str = "???";

const PARENT_DISPLAY: &str = "(last level)";
const PLACEHOLDER_EXTENSION: &str = ".?";

/// One row of a directory snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Entry name relative to the working directory.
    pub name: String,
    /// Extension including the leading dot (`".png"`), empty when absent.
    pub extension: String,
    /// Text shown for the row.
    pub display_name: String,
    /// Whether the entry is a directory.
    pub is_directory: bool,
    /// Set for synthesized rows standing in for unreadable entries.
    pub placeholder: bool,
}

impl FileDescriptor {
    fn parent() -> Self {
        Self {
            name: PARENT_NAME.to_string(),
            extension: String::new(),
            display_name: PARENT_DISPLAY.to_string(),
            is_directory: true,
            placeholder: false,
        }
    }

    fn entry(name: String, is_directory: bool) -> Self {
        let extension = if is_directory {
            String::new()
        } else {
            Path::new(&name)
                .extension()
                .map(|e| format!(".{}", e.to_string_lossy()))
                .unwrap_or_default()
        };
        let display_name = if is_directory {
            format!("[DIR] {name}")
        } else {
            name.clone()
        };
        Self {
            name,
            extension,
            display_name,
            is_directory,
            placeholder: false,
        }
    }

    fn placeholder(err: &std::io::Error) -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            extension: PLACEHOLDER_EXTENSION.to_string(),
            display_name: err.to_string(),
            is_directory: false,
            placeholder: true,
        }
    }

    /// Whether this is the synthetic `..` row.
    pub fn is_parent(&self) -> bool {
        self.name == PARENT_NAME && !self.placeholder
    }
}

/// Result of one directory scan.
#[derive(Debug)]
pub struct ScanOutcome {
    /// `..` first, then the sorted children.
    pub descriptors: Vec<FileDescriptor>,
    /// Set when the directory itself could not be listed.
    pub error: Option<PickerError>,
}

/// Snapshot the children of `dir`.
///
/// Never fails: an unreadable directory yields only the parent row plus an
/// error, and an unreadable child becomes a placeholder row.
pub fn scan(fs: &dyn FileSystem, dir: &Path) -> ScanOutcome {
    let mut descriptors = vec![FileDescriptor::parent()];

    let entries = match fs.read_dir(dir) {
        Ok(entries) => entries,
        Err(source) => {
            trace_scan_failed(dir, &source);
            return ScanOutcome {
                descriptors,
                error: Some(PickerError::Scan {
                    path: dir.display().to_string(),
                    source,
                }),
            };
        }
    };

    let mut placeholders = 0usize;
    let mut children = entries
        .into_iter()
        .map(|entry| match entry {
            Ok(e) => FileDescriptor::entry(e.name, e.is_dir),
            Err(err) => {
                placeholders += 1;
                FileDescriptor::placeholder(&err)
            }
        })
        .collect::<Vec<_>>();
    children.sort_by(compare_entries);
    descriptors.extend(children);

    trace_scan_completed(dir, descriptors.len() - 1, placeholders);
    ScanOutcome {
        descriptors,
        error: None,
    }
}

/// Directories first, then case-insensitive name; raw name breaks ties.
fn compare_entries(a: &FileDescriptor, b: &FileDescriptor) -> Ordering {
    b.is_directory
        .cmp(&a.is_directory)
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(feature = "tracing")]
fn trace_scan_completed(dir: &Path, entries: usize, placeholders: usize) {
    trace!(
        event = "scan.completed",
        dir = %dir.display(),
        entries,
        placeholders,
        "scan completed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_scan_completed(_dir: &Path, _entries: usize, _placeholders: usize) {}

#[cfg(feature = "tracing")]
fn trace_scan_failed(dir: &Path, err: &std::io::Error) {
    warn!(
        event = "scan.failed",
        dir = %dir.display(),
        error = %err,
        "cannot read directory"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_scan_failed(_dir: &Path, _err: &std::io::Error) {}
