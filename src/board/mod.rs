//! Board service: load, mutate, and persist a board's panels.
//!
//! DESIGN
//! ======
//! A [`Board`] is the in-memory view: a title and an ordered panel list.
//! Storage holds the same board as `{id}.name` plus `{id}.items`, a list of
//! item references (see [`crate::reference`]). [`BoardContext`] owns the
//! preference store and the active board id, and every mutation goes
//! through it so memory and storage cannot drift apart.
//!
//! ERROR HANDLING
//! ==============
//! Mutations persist first and touch memory only after the write succeeds.
//! A failed write leaves both views exactly as they were and surfaces a
//! [`BoardError::Persist`].
//!
//! Loading never fails as a whole. A reference that cannot be resolved is
//! skipped, logged, and reported in [`BoardLoad::skipped`] so the host can
//! notify the user; the rest of the board still loads. Skipped references
//! stay in storage untouched.

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use std::path::Path;

use tracing::{info, warn};
use url::Url;
use uuid::Uuid;

use crate::consts::{CURRENT_ID_KEY, DEFAULT_BOARD_ID, DEFAULT_TITLE, ITEMS_SUFFIX, NAME_SUFFIX};
use crate::error::ErrorCode;
use crate::panel::{Color, Panel, PanelError, accepts_file, extension_of};
use crate::prefs::{Preferences, PrefsError};
use crate::reference::{color_reference, file_reference, resolve_reference};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Panel(#[from] PanelError),
    #[error("failed to persist board {board_id}: {source}")]
    Persist {
        board_id: String,
        #[source]
        source: PrefsError,
    },
}

impl ErrorCode for BoardError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Panel(e) => e.error_code(),
            Self::Persist { .. } => "E_PERSIST",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Panel(e) => e.retryable(),
            Self::Persist { source, .. } => source.retryable(),
        }
    }
}

/// A titled, ordered collection of panels.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub id: String,
    pub title: String,
    pub items: Vec<Panel>,
}

impl Board {
    /// A fresh, empty board titled "Untitled".
    #[must_use]
    pub fn untitled(id: &str) -> Self {
        Self { id: id.to_string(), title: DEFAULT_TITLE.to_string(), items: Vec::new() }
    }

    /// Replace the title and panels wholesale from persisted references.
    /// Nothing is written to storage. Returns the references that could
    /// not be resolved.
    pub fn initialize(&mut self, title: &str, references: &[String]) -> Vec<SkippedItem> {
        self.title = title.to_string();
        self.items.clear();

        let mut skipped = Vec::new();
        for reference in references {
            match resolve_reference(reference) {
                Ok(panel) => self.items.push(panel),
                Err(error) => {
                    warn!(board_id = %self.id, %reference, error = %error, "skipping board item");
                    skipped.push(SkippedItem { reference: reference.clone(), error });
                }
            }
        }
        skipped
    }
}

/// A persisted reference that was left out of a loaded board.
#[derive(Debug)]
pub struct SkippedItem {
    pub reference: String,
    pub error: PanelError,
}

/// Outcome of [`BoardContext::load_board`].
#[derive(Debug)]
pub struct BoardLoad {
    pub board: Board,
    pub skipped: Vec<SkippedItem>,
}

#[must_use]
pub fn name_key(board_id: &str) -> String {
    format!("{board_id}{NAME_SUFFIX}")
}

#[must_use]
pub fn items_key(board_id: &str) -> String {
    format!("{board_id}{ITEMS_SUFFIX}")
}

// =============================================================================
// CONTEXT
// =============================================================================

/// Explicit replacement for ambient app state: the preference store plus
/// the id of the board the host is showing.
#[derive(Debug)]
pub struct BoardContext<P: Preferences> {
    prefs: P,
    board_id: String,
}

impl<P: Preferences> BoardContext<P> {
    /// Wrap `prefs`, taking the active board from `currentID` or falling
    /// back to the default board.
    #[must_use]
    pub fn new(prefs: P) -> Self {
        let board_id = prefs
            .string(CURRENT_ID_KEY)
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| DEFAULT_BOARD_ID.to_string());
        Self { prefs, board_id }
    }

    /// Wrap `prefs` with a fixed active board. `currentID` is not written.
    #[must_use]
    pub fn with_board_id(prefs: P, board_id: &str) -> Self {
        Self { prefs, board_id: board_id.to_string() }
    }

    #[must_use]
    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    #[must_use]
    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    #[must_use]
    pub fn into_prefs(self) -> P {
        self.prefs
    }

    /// Make `board_id` the active board and remember the choice.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Persist`] if `currentID` cannot be written.
    pub fn select_board(&mut self, board_id: &str) -> Result<(), BoardError> {
        self.prefs
            .set_string(CURRENT_ID_KEY, board_id)
            .map_err(|source| persist_error(board_id, source))?;
        self.board_id = board_id.to_string();
        info!(%board_id, "selected board");
        Ok(())
    }

    /// Create an empty board under a fresh id, save its title, and make it
    /// the active board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Persist`] if the title or selection cannot be
    /// written.
    pub fn create_board(&mut self, title: &str) -> Result<Board, BoardError> {
        let board_id = Uuid::new_v4().to_string();
        self.prefs
            .set_string(&name_key(&board_id), title)
            .map_err(|source| persist_error(&board_id, source))?;
        self.select_board(&board_id)?;
        info!(%board_id, %title, "created board");
        Ok(Board { id: board_id, title: title.to_string(), items: Vec::new() })
    }

    /// Load the active board.
    #[must_use]
    pub fn load_board(&self) -> BoardLoad {
        self.load_board_id(&self.board_id)
    }

    /// Load `board_id`. A board with no stored title is a fresh "Untitled"
    /// board and loading it writes nothing.
    #[must_use]
    pub fn load_board_id(&self, board_id: &str) -> BoardLoad {
        let mut board = Board::untitled(board_id);
        let Some(title) = self.prefs.string(&name_key(board_id)).filter(|t| !t.is_empty()) else {
            return BoardLoad { board, skipped: Vec::new() };
        };

        let references = self.prefs.string_list(&items_key(board_id));
        let skipped = board.initialize(&title, &references);
        info!(%board_id, items = board.items.len(), skipped = skipped.len(), "loaded board");
        BoardLoad { board, skipped }
    }

    /// Append `panel` to `board`, persisting `reference` as its stored form.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Persist`] if the item list cannot be written;
    /// `board` is unchanged in that case.
    pub fn append_item(&mut self, board: &mut Board, panel: Panel, reference: String) -> Result<(), BoardError> {
        let key = items_key(&board.id);
        let mut references = self.prefs.string_list(&key);
        references.push(reference);
        self.prefs
            .set_string_list(&key, &references)
            .map_err(|source| persist_error(&board.id, source))?;

        info!(board_id = %board.id, kind = ?panel.kind(), count = references.len(), "appended board item");
        board.items.push(panel);
        Ok(())
    }

    /// Rename `board`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Persist`] if the title cannot be written;
    /// `board` is unchanged in that case.
    pub fn set_title(&mut self, board: &mut Board, title: &str) -> Result<(), BoardError> {
        self.prefs
            .set_string(&name_key(&board.id), title)
            .map_err(|source| persist_error(&board.id, source))?;
        info!(board_id = %board.id, %title, "set board title");
        board.title = title.to_string();
        Ok(())
    }

    /// Add a color swatch.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Persist`] if the item cannot be saved.
    pub fn add_color(&mut self, board: &mut Board, color: Color) -> Result<(), BoardError> {
        self.append_item(board, Panel::Color(color), color_reference(color))
    }

    /// Add freeform text, shown as a heading and stored verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Persist`] if the item cannot be saved.
    pub fn add_text(&mut self, board: &mut Board, text: &str) -> Result<(), BoardError> {
        self.append_item(board, Panel::RawString(text.to_string()), text.to_string())
    }

    /// Add a file the host has already read. `source` is stored as the
    /// reference and its last path segment names the resource.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Panel`] for unsupported or undecodable files,
    /// in which case nothing is added, or [`BoardError::Persist`].
    pub fn add_file(&mut self, board: &mut Board, source: &Url, bytes: Vec<u8>) -> Result<(), BoardError> {
        let panel = Panel::from_file(&resource_name(source), bytes)?;
        self.append_item(board, panel, source.to_string())
    }

    /// Read a local file and add it.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Panel`] if the file cannot be read or is not
    /// supported, or [`BoardError::Persist`].
    pub fn add_file_path(&mut self, board: &mut Board, path: &Path) -> Result<(), BoardError> {
        let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        if !accepts_file(&name) {
            return Err(PanelError::UnsupportedFileType(extension_of(&name)).into());
        }
        let uri = file_reference(path)?;
        let bytes = std::fs::read(path)
            .map_err(|source| PanelError::Read { path: path.display().to_string(), source })?;
        self.add_file(board, &uri, bytes)
    }
}

fn persist_error(board_id: &str, source: PrefsError) -> BoardError {
    BoardError::Persist { board_id: board_id.to_string(), source }
}

/// Display name of a resource URI: the file name for local files, else the
/// last path segment.
fn resource_name(uri: &Url) -> String {
    if let Ok(path) = uri.to_file_path() {
        if let Some(name) = path.file_name() {
            return name.to_string_lossy().into_owned();
        }
    }
    uri.path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default()
        .to_string()
}
