use indexmap::IndexSet;

use crate::scanner::FileDescriptor;

/// Names (relative to the working directory) currently chosen by the user.
///
/// Insertion order is kept so `first()` is the earliest pick. In
/// single-select use the set never holds more than one name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    names: IndexSet<String>,
}

impl SelectionSet {
    /// Flip membership of `name` when `multi_select` is on, otherwise make it
    /// the only selected name.
    pub fn toggle_or_replace(&mut self, name: &str, multi_select: bool) {
        if multi_select {
            if !self.names.shift_remove(name) {
                self.names.insert(name.to_string());
            }
        } else {
            self.replace(name);
        }
    }

    /// Apply a row click.
    ///
    /// A selected row toggles off (multi) or becomes the sole selection. An
    /// unselected row is only added when `selectable`.
    pub fn click(&mut self, name: &str, selectable: bool, multi_select: bool) {
        if self.contains(name) || selectable {
            self.toggle_or_replace(name, multi_select);
        }
    }

    /// Make `name` the only selected name.
    pub fn replace(&mut self, name: &str) {
        self.names.clear();
        self.names.insert(name.to_string());
    }

    /// Same as [`replace`](Self::replace); used for double-click confirmation
    /// where multi-select state is irrelevant.
    pub fn confirm(&mut self, name: &str) {
        self.replace(name);
    }

    /// Select every non-parent entry of the requested kind. Files must also
    /// pass `filter`.
    pub fn select_all<F>(
        &mut self,
        descriptors: &[FileDescriptor],
        filter: F,
        select_directory: bool,
    ) where
        F: Fn(&str) -> bool,
    {
        self.names.clear();
        for d in descriptors {
            if d.is_parent() || d.placeholder || d.is_directory != select_directory {
                continue;
            }
            if d.is_directory || filter(&d.extension) {
                self.names.insert(d.name.clone());
            }
        }
    }

    /// Keep only the earliest selected name.
    pub fn keep_first(&mut self) {
        self.names.truncate(1);
    }

    /// Drop names not present in `descriptors`.
    pub fn retain_present(&mut self, descriptors: &[FileDescriptor]) {
        self.names
            .retain(|n| descriptors.iter().any(|d| !d.placeholder && d.name == *n));
    }

    /// Whether `name` is selected.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Earliest selected name.
    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    /// The selected name when exactly one is selected.
    pub fn single(&self) -> Option<&str> {
        if self.names.len() == 1 { self.first() } else { None }
    }

    /// Selected names in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of selected names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Deselect everything.
    pub fn clear(&mut self) {
        self.names.clear();
    }
}
