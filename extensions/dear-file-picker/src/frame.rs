use std::path::{Path, PathBuf};

use crate::core::{EntryKind, PickerFlags};
use crate::path_edit::Breadcrumb;
use crate::picker::Mode;
use crate::text_buffer::TextBuffer;

/// Keyboard modifier keys held during an interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Ctrl key held.
    pub ctrl: bool,
    /// Shift key held.
    pub shift: bool,
}

impl Modifiers {
    /// Only Ctrl held.
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
    };
}

/// Keys the picker reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerKey {
    /// Confirm (with `CONFIRM_ON_ENTER`).
    Enter,
    /// Cancel the active edit, or close (with `CLOSE_ON_ESCAPE`).
    Escape,
    /// Select all when combined with Ctrl.
    A,
    /// Delete the selection.
    Delete,
    /// Rename the selected entry.
    F2,
    /// Rescan the working directory.
    F5,
}

/// User interaction reported by the presentation layer for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Single click on the row named `name`.
    Click {
        /// Entry name of the row.
        name: String,
        /// Modifiers held during the click.
        modifiers: Modifiers,
    },
    /// Double click on the row named `name`.
    DoubleClick {
        /// Entry name of the row.
        name: String,
    },
    /// Key pressed while the picker window was focused.
    Key {
        /// Pressed key.
        key: PickerKey,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// A breadcrumb segment was clicked.
    Breadcrumb {
        /// The segment's target directory.
        target: PathBuf,
    },
    /// Switch the path bar to a text editor.
    BeginPathEdit,
    /// The active editor lost focus after its text changed.
    EditorCommitted,
    /// The active editor lost focus without changes.
    EditorDeactivated,
    /// Rescan the working directory.
    Refresh,
    /// Pick a filter by index.
    SelectFilter(usize),
    /// Start creating a new entry.
    BeginCreate(EntryKind),
    /// Start renaming the single selected entry.
    BeginRename,
    /// Delete the selection at the start of the next frame.
    RequestDelete,
    /// Abandon the active edit.
    CancelEdit,
    /// OK button.
    Ok,
    /// Cancel button.
    Cancel,
    /// The host closed the popup (e.g. clicked outside a non-modal popup).
    Dismissed,
}

/// One visible row of the entry list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowView<'a> {
    /// Entry name; echoed back in [`Intent::Click`]/[`Intent::DoubleClick`].
    pub name: &'a str,
    /// Text to draw.
    pub display_name: &'a str,
    /// Whether the entry is a directory.
    pub is_directory: bool,
    /// Highlighted as selected.
    pub selected: bool,
    /// Whether clicking may add this row to the selection.
    pub selectable: bool,
}

/// Everything a renderer needs to draw one frame of the picker.
#[derive(Debug)]
pub struct FrameView<'a> {
    /// Window title, also the popup identifier.
    pub title: &'a str,
    /// Window position.
    pub position: (i32, i32),
    /// Window size.
    pub size: (u32, u32),
    /// Behavior flags (modal/titlebar etc).
    pub flags: PickerFlags,
    /// The popup must be opened this frame.
    pub opening: bool,
    /// The popup must be closed this frame.
    pub closing: bool,
    /// Position changed since the last frame and must be re-applied.
    pub position_dirty: bool,
    /// Keyboard focus should move to the active editor.
    pub focus_editor: bool,
    /// Current interaction mode.
    pub mode: Mode,
    /// Absolute working directory.
    pub working_directory: &'a Path,
    /// Path bar segments (shown while not editing the path).
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Rows passing the filter and visibility flags, in scan order.
    pub rows: Vec<RowView<'a>>,
    /// Filter labels; empty hides the filter dropdown.
    pub filters: Vec<&'a str>,
    /// Index of the active filter.
    pub selected_filter: usize,
    /// Last failure message, if any.
    pub diagnostic: Option<&'a str>,
    /// Whether the OK button is enabled.
    pub ok_enabled: bool,
    /// Buffer of the editor active in `mode`, if any.
    pub editor: Option<&'a mut TextBuffer>,
}

/// What the renderer observed while drawing a frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Interactions in the order they happened.
    pub intents: Vec<Intent>,
    /// Whether the picker window (or a child) had keyboard focus.
    pub window_focused: bool,
}

impl FrameReport {
    /// Focused report carrying `intents`.
    pub fn focused(intents: Vec<Intent>) -> Self {
        Self {
            intents,
            window_focused: true,
        }
    }
}

/// Renderer boundary: draws a [`FrameView`] and reports user intents.
pub trait PresentationAdapter {
    /// Draw one frame.
    fn present(&mut self, view: FrameView<'_>) -> FrameReport;
}

impl<F> PresentationAdapter for F
where
    F: FnMut(FrameView<'_>) -> FrameReport,
{
    fn present(&mut self, view: FrameView<'_>) -> FrameReport {
        self(view)
    }
}
