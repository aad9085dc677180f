//! Shared constants for the board model and layout engine.

// ── Layout ──────────────────────────────────────────────────────

/// Narrowest a masonry column may be, in logical units.
pub const MIN_COLUMN_WIDTH: f64 = 240.0;

/// Gap between columns and between stacked panels (theme padding).
pub const DEFAULT_PADDING: f64 = 4.0;

/// Height given to wrapped text before its natural height is measured.
pub const PROVISIONAL_TEXT_HEIGHT: f64 = 105.0;

/// Height-to-width ratio of a color swatch (4:1).
pub const SWATCH_RATIO: f64 = 0.25;

/// Container width the host starts with before the first resize.
pub const DEFAULT_CONTAINER_WIDTH: f64 = MIN_COLUMN_WIDTH * 1.5;

// ── Persistence ─────────────────────────────────────────────────

/// Board id used when no `currentID` has been stored.
pub const DEFAULT_BOARD_ID: &str = "default";

/// Title of a board that has never been saved.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Preference key selecting the active board.
pub const CURRENT_ID_KEY: &str = "currentID";

/// Suffix appended to a board id for its title key.
pub const NAME_SUFFIX: &str = ".name";

/// Suffix appended to a board id for its item-reference list key.
pub const ITEMS_SUFFIX: &str = ".items";

/// Scheme prefix of an encoded color reference.
pub const COLOR_SCHEME_PREFIX: &str = "color://";

/// File extensions the file-open surface accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 4] = [".png", ".jpeg", ".jpg", ".txt"];
