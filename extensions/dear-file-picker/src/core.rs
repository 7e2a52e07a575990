use std::io;
use std::path::PathBuf;
use thiserror::Error;

bitflags::bitflags! {
    /// Behavior flags of a [`FilePicker`](crate::FilePicker).
    ///
    /// Flags are fixed for the lifetime of a picker unless replaced wholesale
    /// through [`FilePicker::set_flags`](crate::FilePicker::set_flags).
    #[repr(transparent)]
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PickerFlags: u32 {
        /// Hide the window title bar.
        const NO_TITLEBAR = 1 << 0;
        /// Present as a regular popup instead of a modal one.
        const NO_MODAL = 1 << 1;

        /// Close (cancel) the picker when Escape is pressed while it is focused.
        const CLOSE_ON_ESCAPE = 1 << 4;
        /// Confirm the picker when Enter is pressed while it is focused.
        const CONFIRM_ON_ENTER = 1 << 5;

        /// Select directories instead of files.
        const SELECT_DIRECTORY = 1 << 8;
        /// Hide regular files (only meaningful with `SELECT_DIRECTORY`).
        const HIDE_REGULAR_FILES = 1 << 9;
        /// Allow Ctrl+click and Ctrl+A multi selection.
        const MULTIPLE_SELECTION = 1 << 10;

        /// Allow editing the working directory as text.
        const PATH_EDITABLE = 1 << 12;

        /// Allow creating regular files.
        const CREATE_FILE = 1 << 16;
        /// Allow creating directories.
        const CREATE_DIRECTORY = 1 << 17;
        /// Allow renaming regular files.
        const RENAME_FILE = 1 << 18;
        /// Allow renaming directories.
        const RENAME_DIRECTORY = 1 << 19;
        /// Allow deleting regular files.
        const DELETE_FILE = 1 << 20;
        /// Allow deleting directories (recursively).
        const DELETE_DIRECTORY = 1 << 21;
    }
}

impl PickerFlags {
    /// Flag gating creation of entries of `kind`.
    pub fn create_flag(kind: EntryKind) -> Self {
        match kind {
            EntryKind::File => Self::CREATE_FILE,
            EntryKind::Directory => Self::CREATE_DIRECTORY,
        }
    }

    /// Flag gating renaming of entries of `kind`.
    pub fn rename_flag(kind: EntryKind) -> Self {
        match kind {
            EntryKind::File => Self::RENAME_FILE,
            EntryKind::Directory => Self::RENAME_DIRECTORY,
        }
    }

    /// Flag gating deletion of entries of `kind`.
    pub fn delete_flag(kind: EntryKind) -> Self {
        match kind {
            EntryKind::File => Self::DELETE_FILE,
            EntryKind::Directory => Self::DELETE_DIRECTORY,
        }
    }
}

/// Kind of a filesystem entry targeted by create/rename/delete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
}

impl EntryKind {
    /// Kind matching an `is_directory` bit.
    pub fn from_is_dir(is_dir: bool) -> Self {
        if is_dir { Self::Directory } else { Self::File }
    }

    /// Lower-case noun used in user-facing messages.
    pub fn noun(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

/// Default window position.
pub const DEFAULT_POSITION: (i32, i32) = (0, 0);
/// Default window size.
pub const DEFAULT_SIZE: (u32, u32) = (700, 450);
/// Default window title.
pub const DEFAULT_TITLE: &str = "File Browser";

/// Construction parameters for a [`FilePicker`](crate::FilePicker).
///
/// Examples
/// ```
/// use dear_file_picker::{PickerConfig, PickerFlags};
/// let config = PickerConfig::new("Open Image")
///     .with_size(800, 500)
///     .with_flags(PickerFlags::MULTIPLE_SELECTION | PickerFlags::CONFIRM_ON_ENTER);
/// assert_eq!(config.size, (800, 500));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PickerConfig {
    /// Window title; also the popup identifier.
    pub title: String,
    /// Window position `(x, y)`.
    pub position: (i32, i32),
    /// Window size `(width, height)`, both at least 1.
    pub size: (u32, u32),
    /// Behavior flags.
    pub flags: PickerFlags,
    /// Initial working directory (`None` = process current directory).
    pub directory: Option<PathBuf>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            position: DEFAULT_POSITION,
            size: DEFAULT_SIZE,
            flags: PickerFlags::empty(),
            directory: None,
        }
    }
}

impl PickerConfig {
    /// Default configuration with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the window position.
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.position = (x, y);
        self
    }

    /// Set the window size. Zero extents are clamped to 1.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width.max(1), height.max(1));
        self
    }

    /// Replace the flags.
    pub fn with_flags(mut self, flags: PickerFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set the initial working directory.
    pub fn with_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = Some(dir.into());
        self
    }
}

/// Errors reported by picker operations.
///
/// None of these are fatal: the picker stays interactive and the `Display`
/// text is what ends up in the diagnostic slot.
#[derive(Error, Debug)]
pub enum PickerError {
    /// An empty name was supplied to create/rename.
    #[error("name must not be empty")]
    EmptyName,
    /// The supplied name cannot name a child of the working directory.
    #[error("[{0}] is not a valid name")]
    InvalidName(String),
    /// A path resolved but is not a directory.
    #[error("[{0}] is not a valid directory")]
    NotADirectory(String),
    /// A path could not be resolved.
    #[error("Error occurred while processing [{path}]: {source}")]
    Resolve {
        /// Path being resolved.
        path: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The working directory could not be listed.
    #[error("Cannot read directory [{path}]: {source}")]
    Scan {
        /// Directory being scanned.
        path: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Creating an entry failed.
    #[error("Failed to create {} [{name}]: {source}", .kind.noun())]
    Create {
        /// Kind of entry being created.
        kind: EntryKind,
        /// Requested name.
        name: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// Renaming an entry failed.
    #[error("Failed to rename [{from}] to [{to}]: {source}")]
    Rename {
        /// Original name.
        from: String,
        /// Requested name.
        to: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// One or more entries of a batch delete failed.
    #[error("Failed to delete {}", describe_failures(.failures))]
    Delete {
        /// Every failing name with its error, in batch order.
        failures: Vec<(String, io::Error)>,
    },
    /// The operation is disabled by flags or not valid in the current mode.
    #[error("{0}")]
    NotAllowed(&'static str),
}

fn describe_failures(failures: &[(String, io::Error)]) -> String {
    failures
        .iter()
        .map(|(name, err)| format!("[{name}] ({err})"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_have_distinct_bits() {
        let all = [
            PickerFlags::NO_TITLEBAR,
            PickerFlags::NO_MODAL,
            PickerFlags::CLOSE_ON_ESCAPE,
            PickerFlags::CONFIRM_ON_ENTER,
            PickerFlags::SELECT_DIRECTORY,
            PickerFlags::HIDE_REGULAR_FILES,
            PickerFlags::MULTIPLE_SELECTION,
            PickerFlags::PATH_EDITABLE,
            PickerFlags::CREATE_FILE,
            PickerFlags::CREATE_DIRECTORY,
            PickerFlags::RENAME_FILE,
            PickerFlags::RENAME_DIRECTORY,
            PickerFlags::DELETE_FILE,
            PickerFlags::DELETE_DIRECTORY,
        ];
        let mut seen = PickerFlags::empty();
        for flag in all {
            assert!(!seen.intersects(flag), "{flag:?} overlaps");
            seen |= flag;
        }
    }

    #[test]
    fn config_defaults_and_size_clamp() {
        let config = PickerConfig::default();
        assert_eq!(config.title, "File Browser");
        assert_eq!(config.position, (0, 0));
        assert_eq!(config.size, (700, 450));

        let config = PickerConfig::new("Pick").with_size(0, 10);
        assert_eq!(config.size, (1, 10));
    }

    #[test]
    fn delete_error_lists_every_failure() {
        let err = PickerError::Delete {
            failures: vec![
                ("a".into(), io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
                ("b".into(), io::Error::new(io::ErrorKind::NotFound, "gone")),
            ],
        };
        assert_eq!(err.to_string(), "Failed to delete [a] (denied), [b] (gone)");
    }

    #[test]
    fn create_error_names_kind_and_target() {
        let err = PickerError::Create {
            kind: EntryKind::Directory,
            name: "docs".into(),
            source: io::Error::new(io::ErrorKind::AlreadyExists, "exists"),
        };
        assert_eq!(err.to_string(), "Failed to create directory [docs]: exists");
    }
}
