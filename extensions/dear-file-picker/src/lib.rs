#![deny(missing_docs)]
//! Frame-driven file and directory picker core for immediate-mode UIs.
//!
//! The crate owns the picker's state machine (browsing, path editing,
//! creating, renaming), directory scanning, extension filters, selection,
//! and filesystem mutations. Drawing is left to a [`PresentationAdapter`]
//! that receives a [`FrameView`] each frame and reports back [`Intent`]s.
//!
//! ```no_run
//! use dear_file_picker::{
//!     FilePicker, FrameReport, FrameView, PickerConfig, PickerFlags, PresentationAdapter,
//! };
//!
//! // Called once per host frame. `show` keeps running after it returns
//! // `false` so the renderer also sees the final `closing` frame.
//! fn frame(picker: &mut FilePicker, renderer: &mut impl PresentationAdapter) {
//!     picker.show(renderer);
//!     if picker.has_selected() {
//!         for path in picker.get_all_selected() {
//!             println!("{}", path.display());
//!         }
//!         picker.clear_selected();
//!     }
//! }
//!
//! let mut picker = FilePicker::new(
//!     PickerConfig::new("Open").with_flags(PickerFlags::MULTIPLE_SELECTION),
//! );
//! picker.set_filter(["*.png", "*.jpg"]);
//! picker.open();
//!
//! let mut renderer = |view: FrameView<'_>| {
//!     // draw `view` with your UI toolkit and collect intents
//!     let _ = view;
//!     FrameReport::default()
//! };
//! loop {
//!     frame(&mut picker, &mut renderer);
//! }
//! ```
//!
//! Logging goes through `tracing` when the default `tracing` feature is on;
//! no subscriber is installed by the library.

mod core;
mod filter;
mod frame;
mod fs;
mod mutator;
mod path_edit;
mod picker;
mod scanner;
mod selection;
mod text_buffer;

pub use core::{
    DEFAULT_POSITION, DEFAULT_SIZE, DEFAULT_TITLE, EntryKind, PickerConfig, PickerError,
    PickerFlags,
};
pub use filter::{FilterList, WILDCARD, canonicalize as canonicalize_filter};
pub use frame::{
    FrameReport, FrameView, Intent, Modifiers, PickerKey, PresentationAdapter, RowView,
};
pub use fs::{FileSystem, FsEntry, StdFileSystem};
pub use mutator::{Mutator, validate_name};
pub use path_edit::{Breadcrumb, breadcrumbs, resolve_typed_directory};
pub use picker::{FilePicker, Mode};
pub use scanner::{FileDescriptor, PARENT_NAME, PLACEHOLDER_NAME, ScanOutcome, scan};
pub use selection::SelectionSet;
pub use text_buffer::TextBuffer;
