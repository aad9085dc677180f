//! Panel model: the displayable units placed on a board.
//!
//! A [`Panel`] is immutable once built; edits replace a panel rather than
//! mutate it. Panels are built from file bytes ([`Panel::from_file`]), from
//! a picked color, from user text, or by resolving a persisted item
//! reference (see [`crate::reference`]).

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

mod color;
pub mod image;

use std::path::Path;

pub use color::Color;
use image::Dimensions;
use serde::Serialize;

use crate::consts::ACCEPTED_EXTENSIONS;
use crate::error::ErrorCode;

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PanelError {
    #[error("unsupported file type {0}")]
    UnsupportedFileType(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {name}: {reason}")]
    ImageDecode { name: String, reason: String },
    #[error("not a local file URI: {0}")]
    InvalidFileUri(String),
}

impl ErrorCode for PanelError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFileType(_) => "E_UNSUPPORTED_FILE_TYPE",
            Self::Read { .. } => "E_FILE_READ",
            Self::ImageDecode { .. } => "E_IMAGE_DECODE",
            Self::InvalidFileUri(_) => "E_INVALID_FILE_URI",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Read { .. })
    }
}

// =============================================================================
// PANEL
// =============================================================================

/// An image resource together with its decoded pixel size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePanel {
    pub resource_name: String,
    pub pixel_data: Vec<u8>,
    pub dimensions: Dimensions,
}

impl ImagePanel {
    /// Probe `pixel_data` for its dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::ImageDecode`] when the bytes are not a readable
    /// PNG or JPEG.
    pub fn decode(resource_name: &str, pixel_data: Vec<u8>) -> Result<Self, PanelError> {
        let dimensions = image::probe(&pixel_data)
            .map_err(|reason| PanelError::ImageDecode { name: resource_name.to_string(), reason })?;
        Ok(Self { resource_name: resource_name.to_string(), pixel_data, dimensions })
    }

    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.dimensions.aspect()
    }
}

/// One displayable unit on a board.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel {
    Image(ImagePanel),
    /// Word-wrapped body text, loaded from a `.txt` file.
    Text { markdown: String },
    /// 4:1 color swatch.
    Color(Color),
    /// Freeform text shown as a heading. Also the display fallback for any
    /// reference that does not resolve to something richer.
    RawString(String),
}

/// Discriminant of [`Panel`], for hosts and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Image,
    Text,
    Color,
    Heading,
}

impl Panel {
    /// Build a panel from file bytes, dispatching on the file extension
    /// (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`PanelError::UnsupportedFileType`] for anything but
    /// `.png`/`.jpeg`/`.jpg`/`.txt`, or [`PanelError::ImageDecode`] for
    /// unreadable image bytes.
    pub fn from_file(name: &str, bytes: Vec<u8>) -> Result<Self, PanelError> {
        let ext = extension_of(name);
        match ext.as_str() {
            ".png" | ".jpeg" | ".jpg" => Ok(Self::Image(ImagePanel::decode(name, bytes)?)),
            ".txt" => Ok(Self::Text { markdown: String::from_utf8_lossy(&bytes).into_owned() }),
            _ => Err(PanelError::UnsupportedFileType(ext)),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PanelKind {
        match self {
            Self::Image(_) => PanelKind::Image,
            Self::Text { .. } => PanelKind::Text,
            Self::Color(_) => PanelKind::Color,
            Self::RawString(_) => PanelKind::Heading,
        }
    }

    /// Short human-readable description for listings.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Image(img) => format!(
                "{} ({}x{})",
                img.resource_name, img.dimensions.width, img.dimensions.height
            ),
            Self::Text { markdown } => first_line(markdown),
            Self::Color(c) => c.to_hex(),
            Self::RawString(s) => format!("## {}", first_line(s)),
        }
    }
}

/// Whether the file-open surface offers `name`. Matches the extensions
/// [`Panel::from_file`] can build a panel from.
#[must_use]
pub fn accepts_file(name: &str) -> bool {
    ACCEPTED_EXTENSIONS.contains(&extension_of(name).as_str())
}

/// Lower-cased extension of `name` including the dot, or `""`.
pub(crate) fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().trim().to_string()
}
