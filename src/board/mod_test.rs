#![allow(clippy::float_cmp)]

use super::*;
use crate::panel::PanelKind;
use crate::panel::test_helpers::{jpeg_bytes, png_bytes};
use crate::prefs::MemoryPreferences;

/// Store whose writes can be switched off to exercise the persist-first path.
#[derive(Debug, Default)]
struct FlakyPreferences {
    inner: MemoryPreferences,
    fail_writes: bool,
}

impl FlakyPreferences {
    fn write_error() -> PrefsError {
        PrefsError::Io {
            path: "flaky".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
        }
    }
}

impl Preferences for FlakyPreferences {
    fn string(&self, key: &str) -> Option<String> {
        self.inner.string(key)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        if self.fail_writes {
            return Err(Self::write_error());
        }
        self.inner.set_string(key, value)
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        self.inner.string_list(key)
    }

    fn set_string_list(&mut self, key: &str, values: &[String]) -> Result<(), PrefsError> {
        if self.fail_writes {
            return Err(Self::write_error());
        }
        self.inner.set_string_list(key, values)
    }
}

fn seeded(title: &str, items: &[&str]) -> MemoryPreferences {
    let mut prefs = MemoryPreferences::new();
    prefs.set_string("default.name", title).unwrap();
    let items: Vec<String> = items.iter().map(|s| (*s).to_string()).collect();
    prefs.set_string_list("default.items", &items).unwrap();
    prefs
}

// --- loading ---

#[test]
fn load_without_title_is_untitled_and_writes_nothing() {
    let ctx = BoardContext::new(MemoryPreferences::new());
    let load = ctx.load_board();

    assert_eq!(load.board, Board::untitled("default"));
    assert_eq!(load.board.title, "Untitled");
    assert!(load.skipped.is_empty());
    assert_eq!(ctx.prefs().string("default.name"), None);
}

#[test]
fn load_ignores_items_when_title_missing() {
    let mut prefs = MemoryPreferences::new();
    prefs.set_string_list("default.items", &["orphan".to_string()]).unwrap();
    let load = BoardContext::new(prefs).load_board();
    assert!(load.board.items.is_empty());
}

#[test]
fn load_end_to_end_preserves_order() {
    let dir = tempfile::tempdir().unwrap();
    let note = dir.path().join("note.txt");
    std::fs::write(&note, "contents of note").unwrap();
    let note_uri = Url::from_file_path(&note).unwrap().to_string();

    let prefs = seeded("Goals", &["color://10,20,30,40", "hello world", &note_uri]);
    let load = BoardContext::new(prefs).load_board();

    assert_eq!(load.board.title, "Goals");
    assert_eq!(
        load.board.items,
        vec![
            Panel::Color(Color::new(10, 20, 30, 40)),
            Panel::RawString("hello world".into()),
            Panel::Text { markdown: "contents of note".into() },
        ]
    );
    assert!(load.skipped.is_empty());
}

#[test]
fn load_skips_unreadable_items_and_keeps_the_rest() {
    let dir = tempfile::tempdir().unwrap();
    let missing = Url::from_file_path(dir.path().join("missing.png")).unwrap().to_string();
    let gif = dir.path().join("anim.gif");
    std::fs::write(&gif, b"GIF89a").unwrap();
    let gif_uri = Url::from_file_path(&gif).unwrap().to_string();

    let prefs = seeded("Mixed", &["first", &missing, &gif_uri, "last"]);
    let ctx = BoardContext::new(prefs);
    let load = ctx.load_board();

    assert_eq!(
        load.board.items,
        vec![Panel::RawString("first".into()), Panel::RawString("last".into())]
    );
    assert_eq!(load.skipped.len(), 2);
    assert_eq!(load.skipped[0].reference, missing);
    assert_eq!(load.skipped[0].error.error_code(), "E_FILE_READ");
    assert!(matches!(load.skipped[1].error, PanelError::UnsupportedFileType(_)));

    // Skipped references are not dropped from storage.
    assert_eq!(ctx.prefs().string_list("default.items").len(), 4);
}

#[test]
fn context_uses_current_id() {
    let mut prefs = MemoryPreferences::new();
    prefs.set_string("currentID", "travel").unwrap();
    prefs.set_string("travel.name", "Travel").unwrap();

    let ctx = BoardContext::new(prefs);
    assert_eq!(ctx.board_id(), "travel");
    assert_eq!(ctx.load_board().board.title, "Travel");
}

#[test]
fn empty_current_id_falls_back_to_default() {
    let mut prefs = MemoryPreferences::new();
    prefs.set_string("currentID", "").unwrap();
    assert_eq!(BoardContext::new(prefs).board_id(), DEFAULT_BOARD_ID);
}

// --- mutations ---

#[test]
fn add_color_appends_and_persists_reference() {
    let mut ctx = BoardContext::new(MemoryPreferences::new());
    let mut board = ctx.load_board().board;

    ctx.add_color(&mut board, Color::from_rgba8(255, 0, 0, 255)).unwrap();

    assert_eq!(board.items, vec![Panel::Color(Color::new(65535, 0, 0, 65535))]);
    assert_eq!(ctx.prefs().string_list("default.items"), vec!["color://65535,0,0,65535".to_string()]);
}

#[test]
fn add_text_is_heading_and_stored_verbatim() {
    let mut ctx = BoardContext::new(MemoryPreferences::new());
    let mut board = ctx.load_board().board;

    ctx.add_text(&mut board, "run a marathon").unwrap();

    assert_eq!(board.items[0].kind(), PanelKind::Heading);
    assert_eq!(ctx.prefs().string_list("default.items"), vec!["run a marathon".to_string()]);
}

#[test]
fn add_file_image_stores_uri() {
    let mut ctx = BoardContext::new(MemoryPreferences::new());
    let mut board = ctx.load_board().board;
    let uri = Url::parse("file:///pictures/Sunset.JPEG").unwrap();

    ctx.add_file(&mut board, &uri, jpeg_bytes(300, 150)).unwrap();

    let Panel::Image(img) = &board.items[0] else { panic!("expected image") };
    assert_eq!(img.resource_name, "Sunset.JPEG");
    assert_eq!(img.aspect(), 2.0);
    assert_eq!(ctx.prefs().string_list("default.items"), vec!["file:///pictures/Sunset.JPEG".to_string()]);
}

#[test]
fn add_file_unsupported_type_adds_nothing() {
    let mut ctx = BoardContext::new(MemoryPreferences::new());
    let mut board = ctx.load_board().board;
    let uri = Url::parse("file:///pictures/anim.gif").unwrap();

    let err = ctx.add_file(&mut board, &uri, vec![0; 8]).unwrap_err();

    assert_eq!(err.error_code(), "E_UNSUPPORTED_FILE_TYPE");
    assert!(board.items.is_empty());
    assert!(ctx.prefs().string_list("default.items").is_empty());
}

#[test]
fn add_file_path_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mood.png");
    std::fs::write(&path, png_bytes(10, 10)).unwrap();

    let mut ctx = BoardContext::new(MemoryPreferences::new());
    let mut board = ctx.load_board().board;
    ctx.add_file_path(&mut board, &path).unwrap();

    let stored = ctx.prefs().string_list("default.items");
    assert_eq!(stored, vec![Url::from_file_path(&path).unwrap().to_string()]);
    assert_eq!(board.items[0].kind(), PanelKind::Image);
}

#[test]
fn add_file_path_missing_file_errors() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = BoardContext::new(MemoryPreferences::new());
    let mut board = ctx.load_board().board;

    let err = ctx.add_file_path(&mut board, &dir.path().join("nope.txt")).unwrap_err();
    assert!(matches!(err, BoardError::Panel(PanelError::Read { .. })));
    assert!(board.items.is_empty());
}

#[test]
fn add_file_path_rejects_filtered_extension_before_reading() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctx = BoardContext::new(MemoryPreferences::new());
    let mut board = ctx.load_board().board;

    // The file does not exist; the extension check comes first.
    let err = ctx.add_file_path(&mut board, &dir.path().join("clip.gif")).unwrap_err();
    assert!(matches!(err, BoardError::Panel(PanelError::UnsupportedFileType(ref ext)) if ext == ".gif"));
}

#[test]
fn append_extends_existing_persisted_list() {
    let prefs = seeded("Goals", &["one"]);
    let mut ctx = BoardContext::new(prefs);
    let mut board = ctx.load_board().board;

    ctx.add_text(&mut board, "two").unwrap();

    assert_eq!(board.items.len(), 2);
    assert_eq!(ctx.prefs().string_list("default.items"), vec!["one".to_string(), "two".to_string()]);
}

#[test]
fn set_title_persists_under_name_key() {
    let mut ctx = BoardContext::new(MemoryPreferences::new());
    let mut board = ctx.load_board().board;

    ctx.set_title(&mut board, "2027").unwrap();

    assert_eq!(board.title, "2027");
    assert_eq!(ctx.prefs().string("default.name").as_deref(), Some("2027"));
    assert_eq!(ctx.load_board().board.title, "2027");
}

#[test]
fn failed_persist_leaves_board_unchanged() {
    let mut ctx = BoardContext::new(FlakyPreferences::default());
    let mut board = ctx.load_board().board;
    ctx.add_text(&mut board, "kept").unwrap();

    let mut flaky = ctx.into_prefs();
    flaky.fail_writes = true;
    let mut ctx = BoardContext::new(flaky);

    let err = ctx.add_text(&mut board, "lost").unwrap_err();
    assert_eq!(err.error_code(), "E_PERSIST");
    assert!(err.retryable());
    assert_eq!(board.items, vec![Panel::RawString("kept".into())]);

    let err = ctx.set_title(&mut board, "Renamed").unwrap_err();
    assert!(matches!(err, BoardError::Persist { .. }));
    assert_eq!(board.title, "Untitled");
    assert_eq!(ctx.prefs().string_list("default.items"), vec!["kept".to_string()]);
}

// --- multiple boards ---

#[test]
fn create_board_selects_new_id() {
    let mut ctx = BoardContext::new(MemoryPreferences::new());
    let board = ctx.create_board("Career").unwrap();

    assert_ne!(board.id, DEFAULT_BOARD_ID);
    assert_eq!(ctx.board_id(), board.id);
    assert_eq!(ctx.prefs().string("currentID"), Some(board.id.clone()));
    assert_eq!(ctx.load_board().board.title, "Career");

    // A new context over the same store resumes on the created board.
    let resumed = BoardContext::new(ctx.into_prefs());
    assert_eq!(resumed.board_id(), board.id);
}

#[test]
fn boards_are_isolated_by_id() {
    let mut ctx = BoardContext::new(MemoryPreferences::new());
    let mut home = ctx.load_board().board;
    ctx.set_title(&mut home, "Home").unwrap();
    ctx.add_text(&mut home, "home item").unwrap();

    let mut other = ctx.create_board("Other").unwrap();
    ctx.add_text(&mut other, "other item").unwrap();

    assert_eq!(ctx.load_board_id("default").board.items, vec![Panel::RawString("home item".into())]);
    assert_eq!(ctx.load_board().board.items, vec![Panel::RawString("other item".into())]);
}

#[test]
fn with_board_id_does_not_write_current_id() {
    let ctx = BoardContext::with_board_id(MemoryPreferences::new(), "pinned");
    assert_eq!(ctx.board_id(), "pinned");
    assert_eq!(ctx.prefs().string("currentID"), None);
}

#[test]
fn initialize_replaces_content_without_persisting() {
    let mut board = Board::untitled("default");
    board.items.push(Panel::RawString("old".into()));

    let skipped = board.initialize("Fresh", &["color://1,2,3,4".to_string()]);

    assert!(skipped.is_empty());
    assert_eq!(board.title, "Fresh");
    assert_eq!(board.items, vec![Panel::Color(Color::new(1, 2, 3, 4))]);
}
