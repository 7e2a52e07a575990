use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use dear_file_picker::{
    EntryKind, FilePicker, FrameReport, FrameView, Intent, Mode, Modifiers, PickerConfig,
    PickerError, PickerFlags, PickerKey, PresentationAdapter,
};
use pretty_assertions::assert_eq;

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    let pid = std::process::id();
    let t = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    p.push(format!("dear-file-picker-{prefix}-{pid}-{t}"));
    p
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dear_file_picker=trace".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Temp directory populated with `files` and `dirs`, removed on drop.
struct Fixture {
    root: PathBuf,
}

impl Fixture {
    fn new(prefix: &str, dirs: &[&str], files: &[&str]) -> Self {
        let root = unique_temp_dir(prefix);
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(&root).unwrap();
        for d in dirs {
            std::fs::create_dir_all(root.join(d)).unwrap();
        }
        for f in files {
            std::fs::write(root.join(f), b"x").unwrap();
        }
        let root = std::fs::canonicalize(&root).unwrap();
        Self { root }
    }

    fn picker(&self, flags: PickerFlags) -> FilePicker {
        let config = PickerConfig::new("Pick")
            .with_flags(flags)
            .with_directory(&self.root);
        let mut picker = FilePicker::new(config);
        picker.open();
        picker
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// Owned copy of what the picker exposed during one frame.
#[derive(Debug, Default, Clone)]
struct Snapshot {
    rows: Vec<String>,
    selected: Vec<String>,
    diagnostic: Option<String>,
    ok_enabled: bool,
    mode: Option<Mode>,
    editor: Option<String>,
}

/// Plays back one scripted frame per `show()` call.
#[derive(Default)]
struct ScriptedAdapter {
    frames: VecDeque<(Option<String>, Vec<Intent>)>,
    seen: Vec<Snapshot>,
}

impl ScriptedAdapter {
    fn frame(&mut self, intents: Vec<Intent>) -> &mut Self {
        self.frames.push_back((None, intents));
        self
    }

    fn typed(&mut self, text: &str, intents: Vec<Intent>) -> &mut Self {
        self.frames.push_back((Some(text.to_string()), intents));
        self
    }

    fn last(&self) -> Snapshot {
        self.seen.last().cloned().unwrap_or_default()
    }
}

impl PresentationAdapter for ScriptedAdapter {
    fn present(&mut self, view: FrameView<'_>) -> FrameReport {
        let (text, intents) = self.frames.pop_front().unwrap_or_default();
        let editor = view.editor.map(|editor| {
            let before = editor.as_str().into_owned();
            if let Some(text) = &text {
                editor.set(text);
            }
            before
        });
        self.seen.push(Snapshot {
            rows: view.rows.iter().map(|r| r.name.to_string()).collect(),
            selected: view
                .rows
                .iter()
                .filter(|r| r.selected)
                .map(|r| r.name.to_string())
                .collect(),
            diagnostic: view.diagnostic.map(str::to_string),
            ok_enabled: view.ok_enabled,
            mode: Some(view.mode),
            editor,
        });
        FrameReport::focused(intents)
    }
}

fn run(picker: &mut FilePicker, adapter: &mut ScriptedAdapter) {
    while !adapter.frames.is_empty() {
        picker.show(adapter);
    }
}

fn click(name: &str) -> Intent {
    Intent::Click {
        name: name.into(),
        modifiers: Modifiers::default(),
    }
}

fn ctrl_click(name: &str) -> Intent {
    Intent::Click {
        name: name.into(),
        modifiers: Modifiers::CTRL,
    }
}

fn key(key: PickerKey) -> Intent {
    Intent::Key {
        key,
        modifiers: Modifiers::default(),
    }
}

fn names(picker: &FilePicker) -> Vec<String> {
    picker.descriptors().iter().map(|d| d.name.clone()).collect()
}

#[test]
fn scan_orders_parent_directories_then_files() {
    init_tracing();
    let fx = Fixture::new("order", &["A"], &["b.txt", "a.png"]);
    let picker = fx.picker(PickerFlags::empty());
    assert_eq!(names(&picker), vec!["..", "A", "a.png", "b.txt"]);
    assert_eq!(picker.descriptors()[1].display_name, "[DIR] A");
}

#[test]
fn open_file_multi_select_and_confirm() {
    init_tracing();
    let fx = Fixture::new("multi", &["docs"], &["a.png", "b.png", "c.txt"]);
    let mut picker = fx.picker(PickerFlags::MULTIPLE_SELECTION | PickerFlags::CONFIRM_ON_ENTER);
    picker.set_filter(["*.png", "*.txt"]);

    let mut adapter = ScriptedAdapter::default();
    adapter
        .frame(vec![ctrl_click("a.png"), ctrl_click("c.txt")])
        .frame(vec![Intent::SelectFilter(1)])
        .frame(vec![key(PickerKey::Enter)]);
    run(&mut picker, &mut adapter);

    let frames = &adapter.seen;
    assert_eq!(frames[0].rows, vec!["..", "docs", "a.png", "b.png", "c.txt"]);
    assert!(!frames[0].ok_enabled);
    assert_eq!(frames[1].selected, vec!["a.png", "c.txt"]);
    assert_eq!(frames[2].rows, vec!["..", "docs", "a.png", "b.png"]);

    assert!(!picker.is_open());
    assert!(picker.has_selected());
    assert_eq!(
        picker.get_all_selected(),
        vec![fx.root.join("a.png"), fx.root.join("c.txt")]
    );
}

#[test]
fn select_directory_mode_returns_working_directory_by_default() {
    let fx = Fixture::new("dirmode", &["x", "y"], &["f.txt"]);
    let mut picker = fx.picker(PickerFlags::SELECT_DIRECTORY | PickerFlags::HIDE_REGULAR_FILES);

    let mut adapter = ScriptedAdapter::default();
    adapter.frame(vec![click("f.txt"), Intent::Ok]);
    run(&mut picker, &mut adapter);

    assert_eq!(adapter.seen[0].rows, vec!["..", "x", "y"]);
    assert!(adapter.seen[0].ok_enabled);
    assert!(picker.has_selected());
    assert_eq!(picker.get_selected(), fx.root);
}

#[test]
fn navigate_into_directory_and_back_up() {
    let fx = Fixture::new("navigate", &["docs/inner"], &["docs/readme.md"]);
    let mut picker = fx.picker(PickerFlags::empty());

    let mut adapter = ScriptedAdapter::default();
    adapter
        .frame(vec![Intent::DoubleClick {
            name: "docs".into(),
        }])
        .frame(vec![])
        .frame(vec![Intent::DoubleClick { name: "..".into() }])
        .frame(vec![]);
    run(&mut picker, &mut adapter);

    assert_eq!(adapter.seen[1].rows, vec!["..", "inner", "readme.md"]);
    assert_eq!(picker.working_directory(), fx.root.as_path());
}

#[test]
fn create_rename_delete_round_trip() {
    init_tracing();
    let fx = Fixture::new("mutate", &[], &["a.png"]);
    let flags = PickerFlags::CREATE_DIRECTORY
        | PickerFlags::RENAME_FILE
        | PickerFlags::DELETE_FILE
        | PickerFlags::DELETE_DIRECTORY;
    let mut picker = fx.picker(flags);

    let mut adapter = ScriptedAdapter::default();
    adapter
        .frame(vec![Intent::BeginCreate(EntryKind::Directory)])
        .typed("  docs ", vec![Intent::EditorCommitted])
        .frame(vec![click("a.png"), key(PickerKey::F2)])
        .typed("b.png", vec![Intent::EditorCommitted])
        .frame(vec![click("b.png"), key(PickerKey::Delete)])
        .frame(vec![]);
    run(&mut picker, &mut adapter);

    assert_eq!(adapter.seen[1].mode, Some(Mode::Creating(EntryKind::Directory)));
    assert_eq!(adapter.seen[1].editor.as_deref(), Some(""));
    assert_eq!(adapter.seen[3].editor.as_deref(), Some("a.png"));
    assert_eq!(adapter.seen[4].rows, vec!["..", "docs", "b.png"]);
    assert_eq!(adapter.seen[5].rows, vec!["..", "docs"]);
    assert!(fx.root.join("docs").is_dir());
    assert!(!fx.root.join("b.png").exists());
    assert_eq!(picker.diagnostic(), None);
}

#[test]
fn empty_names_are_rejected_before_touching_disk() {
    let fx = Fixture::new("empty_names", &[], &["a.png"]);
    let mut picker = fx.picker(PickerFlags::CREATE_FILE | PickerFlags::RENAME_FILE);
    let before = picker.descriptors().to_vec();

    assert!(matches!(
        picker.create(EntryKind::File, ""),
        Err(PickerError::EmptyName)
    ));
    assert_eq!(picker.descriptors(), before.as_slice());

    let mut adapter = ScriptedAdapter::default();
    adapter.frame(vec![click("a.png")]);
    run(&mut picker, &mut adapter);
    assert!(matches!(
        picker.rename(EntryKind::File, "a.png", ""),
        Err(PickerError::EmptyName)
    ));
    assert_eq!(picker.descriptors(), before.as_slice());
    assert_eq!(picker.selection().iter().collect::<Vec<_>>(), vec!["a.png"]);
    assert!(fx.root.join("a.png").exists());
}

#[test]
fn deletion_happens_on_the_following_frame() {
    let fx = Fixture::new("deferred_delete", &["docs/nested"], &["docs/nested/f.txt"]);
    let mut picker = fx.picker(PickerFlags::SELECT_DIRECTORY | PickerFlags::DELETE_DIRECTORY);

    let mut adapter = ScriptedAdapter::default();
    adapter.frame(vec![click("docs"), Intent::RequestDelete]);
    run(&mut picker, &mut adapter);
    assert!(names(&picker).contains(&"docs".to_string()));
    assert!(fx.root.join("docs").exists());

    adapter.frame(vec![]);
    run(&mut picker, &mut adapter);
    assert_eq!(adapter.last().rows, vec![".."]);
    assert!(picker.selection().is_empty());
    assert!(!fx.root.join("docs").exists());
}

#[test]
fn typed_path_with_file_falls_back_to_parent() {
    let fx = Fixture::new("typed_path", &["sub"], &["sub/notes.md"]);
    let mut picker = fx.picker(PickerFlags::PATH_EDITABLE);
    let typed = fx.root.join("sub").join("notes.md");
    let missing = fx.root.join("missing").join("deeper");

    let mut adapter = ScriptedAdapter::default();
    adapter
        .frame(vec![Intent::BeginPathEdit])
        .typed(&missing.display().to_string(), vec![Intent::EditorCommitted])
        .typed(&typed.display().to_string(), vec![Intent::EditorCommitted])
        .frame(vec![]);
    run(&mut picker, &mut adapter);

    assert_eq!(
        adapter.seen[1].editor.as_deref(),
        Some(fx.root.display().to_string().as_str())
    );
    assert_eq!(
        adapter.seen[2].diagnostic,
        Some(format!("[{}] is not a valid directory", missing.display()))
    );
    assert_eq!(adapter.seen[2].mode, Some(Mode::EditingPath));
    assert_eq!(picker.working_directory(), fx.root.join("sub").as_path());
    assert_eq!(picker.mode(), Mode::Browsing);
    assert_eq!(picker.diagnostic(), None);
}

#[test]
fn escape_cancels_edit_before_closing() {
    let fx = Fixture::new("escape", &[], &[]);
    let mut picker = fx.picker(PickerFlags::CREATE_FILE | PickerFlags::CLOSE_ON_ESCAPE);

    let mut adapter = ScriptedAdapter::default();
    adapter
        .frame(vec![Intent::BeginCreate(EntryKind::File)])
        .frame(vec![key(PickerKey::Escape)]);
    run(&mut picker, &mut adapter);
    assert!(picker.is_open());
    assert_eq!(picker.mode(), Mode::Browsing);

    adapter.frame(vec![key(PickerKey::Escape)]);
    run(&mut picker, &mut adapter);
    assert!(!picker.is_open());
    assert!(!picker.has_selected());
}

#[test]
fn unreadable_working_directory_reports_and_recovers() {
    let fx = Fixture::new("vanished", &["gone"], &[]);
    let gone = fx.root.join("gone");
    let config = PickerConfig::new("Pick").with_directory(&gone);
    let mut picker = FilePicker::new(config);
    std::fs::remove_dir_all(&gone).unwrap();
    picker.open();

    assert_eq!(names(&picker), vec![".."]);
    let diagnostic = picker.diagnostic().unwrap_or_default().to_string();
    assert!(diagnostic.starts_with("Cannot read directory"), "{diagnostic}");

    picker.set_working_directory(&fx.root).unwrap();
    assert_eq!(picker.diagnostic(), None);
    assert_eq!(picker.working_directory(), fx.root.as_path());

    let err = picker.set_working_directory(fx.root.join("nope")).unwrap_err();
    assert!(matches!(err, PickerError::Resolve { .. }));
    assert_eq!(picker.working_directory(), Path::new(&fx.root));
}
