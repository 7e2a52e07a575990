use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use crate::core::{EntryKind, PickerConfig, PickerError, PickerFlags};
use crate::filter::FilterList;
use crate::frame::{
    FrameReport, FrameView, Intent, Modifiers, PickerKey, PresentationAdapter, RowView,
};
use crate::fs::{FileSystem, StdFileSystem};
use crate::mutator::{Mutator, validate_name};
use crate::path_edit::{breadcrumbs, parent_of, resolve_typed_directory};
use crate::scanner::{FileDescriptor, scan};
use crate::selection::SelectionSet;
use crate::text_buffer::TextBuffer;

#[cfg(feature = "tracing")]
use tracing::{debug, trace, warn};

/// Interaction mode of an open picker. Exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Browsing and selecting entries.
    #[default]
    Browsing,
    /// Typing a working directory into the path editor.
    EditingPath,
    /// Typing the name of a new entry.
    Creating(EntryKind),
    /// Typing a new name for the single selected entry.
    Renaming(EntryKind),
}

/// Work deferred to the start of the next [`FilePicker::show`] call, so the
/// entry list is never replaced while a frame is iterating it.
#[derive(Clone, Debug, PartialEq, Eq)]
enum PendingAction {
    SetWorkingDirectory(PathBuf),
    DeleteSelected,
    FocusEditorNextFrame,
    WindowPositionDirty,
}

impl PendingAction {
    fn label(&self) -> &'static str {
        match self {
            Self::SetWorkingDirectory(_) => "set_working_directory",
            Self::DeleteSelected => "delete_selected",
            Self::FocusEditorNextFrame => "focus_editor",
            Self::WindowPositionDirty => "window_position_dirty",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Frame-driven file/directory picker.
///
/// The host calls [`open`](Self::open) once and [`show`](Self::show) every
/// frame; drawing is delegated to a [`PresentationAdapter`]. After the user
/// confirms, [`has_selected`](Self::has_selected) turns true and the chosen
/// paths are available from [`get_all_selected`](Self::get_all_selected).
pub struct FilePicker {
    config: PickerConfig,
    fs: Box<dyn FileSystem>,
    lifecycle: Lifecycle,
    mode: Mode,
    pending: VecDeque<PendingAction>,
    working_directory: PathBuf,
    descriptors: Vec<FileDescriptor>,
    selection: SelectionSet,
    filters: FilterList,
    diagnostic: Option<String>,
    selected: bool,
    path_editor: TextBuffer,
    create_editor: TextBuffer,
    rename_editor: TextBuffer,
}

impl std::fmt::Debug for FilePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePicker")
            .field("config", &self.config)
            .field("lifecycle", &self.lifecycle)
            .field("mode", &self.mode)
            .field("working_directory", &self.working_directory)
            .field("selection", &self.selection)
            .field("diagnostic", &self.diagnostic)
            .finish_non_exhaustive()
    }
}

impl FilePicker {
    /// Create a picker over the real filesystem.
    pub fn new(config: PickerConfig) -> Self {
        Self::with_file_system(config, StdFileSystem)
    }

    /// Create a picker over a custom filesystem.
    pub fn with_file_system(config: PickerConfig, fs: impl FileSystem + 'static) -> Self {
        let fs: Box<dyn FileSystem> = Box::new(fs);
        let working_directory = initial_directory(fs.as_ref(), config.directory.as_deref());
        let mut pending = VecDeque::new();
        if config.position != crate::core::DEFAULT_POSITION {
            pending.push_back(PendingAction::WindowPositionDirty);
        }
        Self {
            config,
            fs,
            lifecycle: Lifecycle::Closed,
            mode: Mode::Browsing,
            pending,
            working_directory,
            descriptors: Vec::new(),
            selection: SelectionSet::default(),
            filters: FilterList::default(),
            diagnostic: None,
            selected: false,
            path_editor: TextBuffer::default(),
            create_editor: TextBuffer::default(),
            rename_editor: TextBuffer::default(),
        }
    }

    /// Open the picker: rescan, clear the selection, and present the popup on
    /// the next [`show`](Self::show). No-op while already open.
    pub fn open(&mut self) {
        if self.is_open() {
            return;
        }
        self.clear_selected();
        self.mode = Mode::Browsing;
        self.rescan();
        self.set_lifecycle(Lifecycle::Opening);
    }

    /// Close without confirming. The filesystem is left untouched.
    pub fn close(&mut self) {
        self.selection.clear();
        if self.lifecycle != Lifecycle::Closed {
            self.finish(false);
        }
    }

    /// Whether the picker is open (or about to open).
    pub fn is_open(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Opening | Lifecycle::Open)
    }

    /// Run one frame: apply deferred actions, present, then apply the
    /// reported intents. Returns whether the picker is still open.
    ///
    /// Call this every frame. After a confirm or cancel it returns `false`,
    /// and the next call still presents one frame with
    /// [`FrameView::closing`] set.
    pub fn show<A>(&mut self, adapter: &mut A) -> bool
    where
        A: PresentationAdapter + ?Sized,
    {
        if self.lifecycle == Lifecycle::Closed {
            return false;
        }

        let mut position_dirty = false;
        let mut focus_editor = false;
        while let Some(action) = self.pending.pop_front() {
            trace_pending_applied(action.label());
            match action {
                PendingAction::SetWorkingDirectory(dir) => {
                    if let Err(err) = self.set_working_directory(&dir) {
                        self.diagnostic = Some(err.to_string());
                    }
                }
                PendingAction::DeleteSelected => self.apply_delete(),
                PendingAction::FocusEditorNextFrame => focus_editor = true,
                PendingAction::WindowPositionDirty => position_dirty = true,
            }
        }

        let opening = self.lifecycle == Lifecycle::Opening;
        let closing = self.lifecycle == Lifecycle::Closing;
        let report = self.present(adapter, opening, closing, position_dirty, focus_editor);

        match self.lifecycle {
            Lifecycle::Closing => {
                self.set_lifecycle(Lifecycle::Closed);
                return false;
            }
            Lifecycle::Opening => self.set_lifecycle(Lifecycle::Open),
            _ => {}
        }

        let FrameReport {
            intents,
            window_focused,
        } = report;
        for intent in intents {
            if self.lifecycle != Lifecycle::Open {
                break;
            }
            self.handle_intent(intent, window_focused, focus_editor);
        }
        self.is_open()
    }

    fn present<A>(
        &mut self,
        adapter: &mut A,
        opening: bool,
        closing: bool,
        position_dirty: bool,
        focus_editor: bool,
    ) -> FrameReport
    where
        A: PresentationAdapter + ?Sized,
    {
        let ok_enabled = self.ok_enabled();
        let rows = visible_rows(
            &self.descriptors,
            &self.selection,
            &self.filters,
            self.config.flags,
        );
        let editor = match self.mode {
            Mode::Browsing => None,
            Mode::EditingPath => Some(&mut self.path_editor),
            Mode::Creating(_) => Some(&mut self.create_editor),
            Mode::Renaming(_) => Some(&mut self.rename_editor),
        };
        let view = FrameView {
            title: &self.config.title,
            position: self.config.position,
            size: self.config.size,
            flags: self.config.flags,
            opening,
            closing,
            position_dirty,
            focus_editor,
            mode: self.mode,
            working_directory: &self.working_directory,
            breadcrumbs: breadcrumbs(&self.working_directory),
            rows,
            filters: self.filters.labels(),
            selected_filter: self.filters.selected_index(),
            diagnostic: self.diagnostic.as_deref(),
            ok_enabled,
            editor,
        };
        adapter.present(view)
    }

    fn finish(&mut self, confirmed: bool) {
        if confirmed {
            self.selected = true;
        }
        self.mode = Mode::Browsing;
        self.set_lifecycle(Lifecycle::Closing);
    }

    fn set_lifecycle(&mut self, next: Lifecycle) {
        if self.lifecycle != next {
            trace_lifecycle(self.lifecycle, next);
            self.lifecycle = next;
        }
    }

    /// Whether the user confirmed a selection.
    pub fn has_selected(&self) -> bool {
        self.selected
    }

    /// First selected path, or the working directory when nothing is selected.
    pub fn get_selected(&self) -> PathBuf {
        match self.selection.first() {
            Some(name) => self.working_directory.join(name),
            None => self.working_directory.clone(),
        }
    }

    /// Every selected path, or just the working directory when nothing is
    /// selected.
    pub fn get_all_selected(&self) -> Vec<PathBuf> {
        if self.selection.is_empty() {
            return vec![self.working_directory.clone()];
        }
        self.selection
            .iter()
            .map(|name| self.working_directory.join(name))
            .collect()
    }

    /// Reset the confirmed outcome and the selection.
    pub fn clear_selected(&mut self) {
        self.selection.clear();
        self.selected = false;
    }

    /// Absolute working directory.
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Resolve `dir` and make it the working directory, rescanning
    /// immediately. On failure nothing changes.
    pub fn set_working_directory(&mut self, dir: impl AsRef<Path>) -> Result<(), PickerError> {
        let dir = dir.as_ref();
        let resolved = self.fs.canonicalize(dir).map_err(|source| PickerError::Resolve {
            path: dir.display().to_string(),
            source,
        })?;
        match self.fs.is_dir(&resolved) {
            Ok(true) => {}
            Ok(false) => return Err(PickerError::NotADirectory(dir.display().to_string())),
            Err(source) => {
                return Err(PickerError::Resolve {
                    path: resolved.display().to_string(),
                    source,
                });
            }
        }

        if resolved != self.working_directory {
            trace_directory_changed(&self.working_directory, &resolved);
            self.selection.clear();
            self.working_directory = resolved;
        }
        self.diagnostic = None;
        self.rescan();
        Ok(())
    }

    /// Rescan the working directory, keeping still-present selected names.
    pub fn refresh(&mut self) {
        self.rescan();
    }

    fn rescan(&mut self) {
        let outcome = scan(self.fs.as_ref(), &self.working_directory);
        self.descriptors = outcome.descriptors;
        self.selection.retain_present(&self.descriptors);
        if matches!(self.mode, Mode::Renaming(_)) && self.selection.single().is_none() {
            self.mode = Mode::Browsing;
        }
        if let Some(err) = outcome.error {
            self.diagnostic = Some(err.to_string());
        }
    }

    fn queue(&mut self, action: PendingAction) {
        if !self.pending.contains(&action) {
            self.pending.push_back(action);
        }
    }

    /// Enter the path editor seeded with the working directory.
    pub fn begin_path_edit(&mut self) -> Result<(), PickerError> {
        if !self.has_flag(PickerFlags::PATH_EDITABLE) {
            return Err(PickerError::NotAllowed("path editing is disabled"));
        }
        self.ensure_browsing()?;
        let text = self.working_directory.display().to_string();
        self.path_editor.set(&text);
        self.mode = Mode::EditingPath;
        self.diagnostic = None;
        self.queue(PendingAction::FocusEditorNextFrame);
        Ok(())
    }

    fn commit_path_edit(&mut self) {
        let text = self.path_editor.as_str().into_owned();
        match resolve_typed_directory(self.fs.as_ref(), &self.working_directory, &text) {
            Ok(dir) => {
                self.diagnostic = None;
                self.mode = Mode::Browsing;
                self.queue(PendingAction::SetWorkingDirectory(dir));
            }
            Err(err) => {
                self.diagnostic = Some(err.to_string());
                self.queue(PendingAction::FocusEditorNextFrame);
            }
        }
    }

    /// Replace the extension filters (e.g. `["*.png", "*.jpg"]`).
    pub fn set_filter<I, S>(&mut self, filters: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.filters.set(filters);
    }

    /// Remove every filter.
    pub fn clear_filter(&mut self) {
        self.filters.clear();
    }

    /// Current filter list.
    pub fn filters(&self) -> &FilterList {
        &self.filters
    }

    /// Activate the filter at `index`; out-of-range indices are ignored.
    pub fn select_filter(&mut self, index: usize) -> bool {
        self.filters.select(index)
    }

    /// Current selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Current scan snapshot, `..` first.
    pub fn descriptors(&self) -> &[FileDescriptor] {
        &self.descriptors
    }

    /// Select every entry of the selectable kind (files must pass the filter).
    /// Does nothing without [`PickerFlags::MULTIPLE_SELECTION`].
    pub fn select_all(&mut self) {
        if !self.has_flag(PickerFlags::MULTIPLE_SELECTION) {
            return;
        }
        let select_directory = self.has_flag(PickerFlags::SELECT_DIRECTORY);
        let filters = &self.filters;
        self.selection
            .select_all(&self.descriptors, |ext| filters.matches(ext), select_directory);
    }

    fn descriptor(&self, name: &str) -> Option<&FileDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.name == name && !d.placeholder)
            .or_else(|| self.descriptors.iter().find(|d| d.name == name))
    }

    fn is_selectable(&self, d: &FileDescriptor) -> bool {
        !d.is_parent()
            && !d.placeholder
            && d.is_directory == self.has_flag(PickerFlags::SELECT_DIRECTORY)
    }

    fn click(&mut self, name: &str, modifiers: Modifiers, window_focused: bool) {
        let Some(selectable) = self.descriptor(name).map(|d| self.is_selectable(d)) else {
            return;
        };
        let multi =
            self.has_flag(PickerFlags::MULTIPLE_SELECTION) && modifiers.ctrl && window_focused;
        self.selection.click(name, selectable, multi);
    }

    fn double_click(&mut self, name: &str) {
        let Some(d) = self.descriptor(name) else {
            return;
        };
        if d.placeholder {
            return;
        }
        if d.is_directory {
            let target = if d.is_parent() {
                parent_of(&self.working_directory)
            } else {
                Some(self.working_directory.join(&d.name))
            };
            if let Some(target) = target {
                self.queue(PendingAction::SetWorkingDirectory(target));
            }
        } else if !self.has_flag(PickerFlags::SELECT_DIRECTORY) {
            self.selection.confirm(name);
            self.finish(true);
        }
    }

    fn ok_enabled(&self) -> bool {
        self.has_flag(PickerFlags::SELECT_DIRECTORY) || !self.selection.is_empty()
    }

    fn try_confirm(&mut self) {
        if self.ok_enabled() {
            self.finish(true);
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn ensure_browsing(&self) -> Result<(), PickerError> {
        if self.mode == Mode::Browsing {
            Ok(())
        } else {
            Err(PickerError::NotAllowed("another edit is in progress"))
        }
    }

    /// Enter [`Mode::Creating`] with an empty name editor.
    pub fn begin_create(&mut self, kind: EntryKind) -> Result<(), PickerError> {
        if !self.has_flag(PickerFlags::create_flag(kind)) {
            return Err(PickerError::NotAllowed("creating this kind of entry is disabled"));
        }
        self.ensure_browsing()?;
        self.selection.clear();
        self.create_editor.clear();
        self.mode = Mode::Creating(kind);
        self.diagnostic = None;
        self.queue(PendingAction::FocusEditorNextFrame);
        Ok(())
    }

    /// Create `name` in the working directory.
    ///
    /// On success the new entry becomes the only selection and the picker
    /// returns to browsing. On failure the entry list is left as is.
    pub fn create(&mut self, kind: EntryKind, name: &str) -> Result<(), PickerError> {
        if !self.has_flag(PickerFlags::create_flag(kind)) {
            return Err(PickerError::NotAllowed("creating this kind of entry is disabled"));
        }
        let result = Mutator::new(self.fs.as_ref(), &self.working_directory).create(kind, name);
        match result {
            Ok(name) => {
                self.diagnostic = None;
                self.rescan();
                self.selection.replace(&name);
                self.selection.retain_present(&self.descriptors);
                if matches!(self.mode, Mode::Creating(_)) {
                    self.mode = Mode::Browsing;
                }
                Ok(())
            }
            Err(err) => Err(self.report(err)),
        }
    }

    /// Enter [`Mode::Renaming`] for the single selected entry.
    pub fn begin_rename(&mut self) -> Result<(), PickerError> {
        self.ensure_browsing()?;
        let Some(name) = self.selection.single().map(str::to_string) else {
            return Err(PickerError::NotAllowed("select exactly one entry to rename"));
        };
        let kind = self
            .descriptor(&name)
            .map(|d| EntryKind::from_is_dir(d.is_directory))
            .unwrap_or(EntryKind::File);
        if !self.has_flag(PickerFlags::rename_flag(kind)) {
            return Err(PickerError::NotAllowed("renaming this kind of entry is disabled"));
        }
        self.rename_editor.set(&name);
        self.mode = Mode::Renaming(kind);
        self.diagnostic = None;
        self.queue(PendingAction::FocusEditorNextFrame);
        Ok(())
    }

    /// Rename `old_name` to `new_name` within the working directory.
    ///
    /// A rejected name changes nothing. Otherwise the directory is rescanned
    /// whether or not the rename succeeded.
    pub fn rename(
        &mut self,
        kind: EntryKind,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), PickerError> {
        if !self.has_flag(PickerFlags::rename_flag(kind)) {
            return Err(PickerError::NotAllowed("renaming this kind of entry is disabled"));
        }
        if let Err(err) = validate_name(new_name) {
            return Err(self.report(err));
        }
        let result = Mutator::new(self.fs.as_ref(), &self.working_directory)
            .rename(kind, old_name, new_name);
        self.rescan();
        match result {
            Ok(new_name) => {
                self.diagnostic = None;
                self.selection.replace(&new_name);
                self.selection.retain_present(&self.descriptors);
                if matches!(self.mode, Mode::Renaming(_)) {
                    self.mode = Mode::Browsing;
                }
                Ok(())
            }
            Err(err) => {
                if matches!(self.mode, Mode::Renaming(_)) && !self.selection.contains(old_name) {
                    self.mode = Mode::Browsing;
                }
                Err(self.report(err))
            }
        }
    }

    /// Schedule deletion of every selected entry for the start of the next
    /// frame.
    pub fn request_delete(&mut self) -> Result<(), PickerError> {
        self.ensure_browsing()?;
        if self.selection.is_empty() {
            return Err(PickerError::NotAllowed("nothing is selected"));
        }
        let allowed = self.selection.iter().all(|name| {
            self.descriptor(name).is_some_and(|d| {
                self.has_flag(PickerFlags::delete_flag(EntryKind::from_is_dir(d.is_directory)))
            })
        });
        if !allowed {
            return Err(PickerError::NotAllowed("deleting this kind of entry is disabled"));
        }
        self.queue(PendingAction::DeleteSelected);
        Ok(())
    }

    fn apply_delete(&mut self) {
        let names = self.selection.iter().map(str::to_string).collect::<Vec<_>>();
        let result =
            Mutator::new(self.fs.as_ref(), &self.working_directory).delete_batch(&names);
        self.selection.clear();
        match result {
            Ok(()) => self.diagnostic = None,
            Err(err) => self.diagnostic = Some(err.to_string()),
        }
        self.rescan();
    }

    /// Leave the active edit without applying it.
    pub fn cancel_edit(&mut self) {
        self.mode = Mode::Browsing;
    }

    fn commit_editor(&mut self) {
        match self.mode {
            Mode::Browsing => {}
            Mode::EditingPath => self.commit_path_edit(),
            Mode::Creating(kind) => {
                let name = self.create_editor.as_str().into_owned();
                let _ = self.create(kind, &name);
            }
            Mode::Renaming(kind) => {
                let Some(old) = self.selection.single().map(str::to_string) else {
                    self.mode = Mode::Browsing;
                    return;
                };
                let new = self.rename_editor.as_str().into_owned();
                let _ = self.rename(kind, &old, &new);
            }
        }
    }

    /// Last failure message, if any.
    pub fn diagnostic(&self) -> Option<&str> {
        self.diagnostic.as_deref()
    }

    fn report(&mut self, err: PickerError) -> PickerError {
        self.diagnostic = Some(err.to_string());
        err
    }

    fn handle_intent(&mut self, intent: Intent, window_focused: bool, focus_frame: bool) {
        let browsing = self.mode == Mode::Browsing;
        match intent {
            Intent::Click { name, modifiers } => {
                if matches!(self.mode, Mode::Browsing | Mode::EditingPath) {
                    self.click(&name, modifiers, window_focused);
                }
            }
            Intent::DoubleClick { name } => {
                if browsing {
                    self.double_click(&name);
                }
            }
            Intent::Key { key, modifiers } => self.handle_key(key, modifiers, window_focused),
            Intent::Breadcrumb { target } => {
                if matches!(self.mode, Mode::Browsing | Mode::EditingPath) {
                    self.queue(PendingAction::SetWorkingDirectory(target));
                }
            }
            Intent::BeginPathEdit => ignore(self.begin_path_edit()),
            Intent::EditorCommitted => self.commit_editor(),
            Intent::EditorDeactivated => {
                // The editor has not received focus yet on the frame that requests it.
                if self.mode == Mode::EditingPath && !focus_frame {
                    self.mode = Mode::Browsing;
                }
            }
            Intent::Refresh => self.refresh(),
            Intent::SelectFilter(index) => {
                self.filters.select(index);
            }
            Intent::BeginCreate(kind) => ignore(self.begin_create(kind)),
            Intent::BeginRename => ignore(self.begin_rename()),
            Intent::RequestDelete => ignore(self.request_delete()),
            Intent::CancelEdit => self.cancel_edit(),
            Intent::Ok => self.try_confirm(),
            Intent::Cancel | Intent::Dismissed => self.close(),
        }
    }

    fn handle_key(&mut self, key: PickerKey, modifiers: Modifiers, window_focused: bool) {
        let browsing = self.mode == Mode::Browsing;
        match key {
            PickerKey::Enter => {
                if browsing && window_focused && self.has_flag(PickerFlags::CONFIRM_ON_ENTER) {
                    self.try_confirm();
                }
            }
            PickerKey::Escape => {
                if !browsing {
                    self.cancel_edit();
                } else if window_focused && self.has_flag(PickerFlags::CLOSE_ON_ESCAPE) {
                    self.close();
                }
            }
            PickerKey::A => {
                if browsing && modifiers.ctrl {
                    self.select_all();
                }
            }
            PickerKey::Delete => {
                if browsing {
                    ignore(self.request_delete());
                }
            }
            PickerKey::F2 => {
                if browsing {
                    ignore(self.begin_rename());
                }
            }
            PickerKey::F5 => self.refresh(),
        }
    }

    /// Full configuration.
    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    /// Window title.
    pub fn title(&self) -> &str {
        &self.config.title
    }

    /// Set the window title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.config.title = title.into();
    }

    /// Window position.
    pub fn position(&self) -> (i32, i32) {
        self.config.position
    }

    /// Move the window; applied on the next frame.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.config.position = (x, y);
        self.queue(PendingAction::WindowPositionDirty);
    }

    /// Move the window horizontally; applied on the next frame.
    pub fn set_position_x(&mut self, x: i32) {
        self.set_position(x, self.config.position.1);
    }

    /// Move the window vertically; applied on the next frame.
    pub fn set_position_y(&mut self, y: i32) {
        self.set_position(self.config.position.0, y);
    }

    /// Window size.
    pub fn size(&self) -> (u32, u32) {
        self.config.size
    }

    /// Resize the window. Zero extents are clamped to 1.
    pub fn set_size(&mut self, width: u32, height: u32) {
        self.config.size = (width.max(1), height.max(1));
    }

    /// Set the window width, keeping the height.
    pub fn set_size_width(&mut self, width: u32) {
        self.set_size(width, self.config.size.1);
    }

    /// Set the window height, keeping the width.
    pub fn set_size_height(&mut self, height: u32) {
        self.set_size(self.config.size.0, height);
    }

    /// Behavior flags.
    pub fn flags(&self) -> PickerFlags {
        self.config.flags
    }

    /// Whether every bit of `flag` is set.
    pub fn has_flag(&self, flag: PickerFlags) -> bool {
        self.config.flags.contains(flag)
    }

    /// Replace all flags. Dropping [`PickerFlags::MULTIPLE_SELECTION`] keeps
    /// only the earliest selected name.
    pub fn set_flags(&mut self, flags: PickerFlags) {
        self.config.flags = flags;
        if !flags.contains(PickerFlags::MULTIPLE_SELECTION) {
            self.selection.keep_first();
        }
    }

    /// Add `flags` to the current ones.
    pub fn append_flags(&mut self, flags: PickerFlags) {
        self.config.flags |= flags;
    }
}

fn ignore(result: Result<(), PickerError>) {
    if let Err(err) = result {
        trace_intent_rejected(&err);
    }
}

fn visible_rows<'a>(
    descriptors: &'a [FileDescriptor],
    selection: &SelectionSet,
    filters: &FilterList,
    flags: PickerFlags,
) -> Vec<RowView<'a>> {
    let select_directory = flags.contains(PickerFlags::SELECT_DIRECTORY);
    let hide_files = select_directory && flags.contains(PickerFlags::HIDE_REGULAR_FILES);
    descriptors
        .iter()
        .filter(|d| d.is_directory || (!hide_files && filters.matches(&d.extension)))
        .map(|d| RowView {
            name: &d.name,
            display_name: &d.display_name,
            is_directory: d.is_directory,
            selected: selection.contains(&d.name),
            selectable: !d.is_parent() && !d.placeholder && d.is_directory == select_directory,
        })
        .collect()
}

fn initial_directory(fs: &dyn FileSystem, dir: Option<&Path>) -> PathBuf {
    let requested = match dir {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };
    match fs.canonicalize(&requested) {
        Ok(resolved) => resolved,
        Err(err) => {
            trace_initial_directory_fallback(&requested, &err);
            std::path::absolute(&requested).unwrap_or(requested)
        }
    }
}

#[cfg(feature = "tracing")]
fn trace_pending_applied(action: &'static str) {
    trace!(event = "picker.pending_applied", action, "pending action applied");
}

#[cfg(not(feature = "tracing"))]
fn trace_pending_applied(_action: &'static str) {}

#[cfg(feature = "tracing")]
fn trace_lifecycle(from: Lifecycle, to: Lifecycle) {
    trace!(event = "picker.lifecycle", ?from, ?to, "lifecycle changed");
}

#[cfg(not(feature = "tracing"))]
fn trace_lifecycle(_from: Lifecycle, _to: Lifecycle) {}

#[cfg(feature = "tracing")]
fn trace_directory_changed(from: &Path, to: &Path) {
    debug!(
        event = "picker.directory_changed",
        from = %from.display(),
        to = %to.display(),
        "working directory changed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_directory_changed(_from: &Path, _to: &Path) {}

#[cfg(feature = "tracing")]
fn trace_intent_rejected(err: &PickerError) {
    trace!(event = "picker.intent_rejected", error = %err, "intent rejected");
}

#[cfg(not(feature = "tracing"))]
fn trace_intent_rejected(_err: &PickerError) {}

#[cfg(feature = "tracing")]
fn trace_initial_directory_fallback(dir: &Path, err: &std::io::Error) {
    warn!(
        event = "picker.initial_directory_fallback",
        dir = %dir.display(),
        error = %err,
        "cannot resolve initial directory"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_initial_directory_fallback(_dir: &Path, _err: &std::io::Error) {}
