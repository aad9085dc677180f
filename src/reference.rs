//! Item references: the persisted string form of a panel.
//!
//! GRAMMAR
//! =======
//! - `file://...`: a local file; resolved by reading it and dispatching on
//!   its extension.
//! - `color://r,g,b,a`: four decimal 16-bit channels.
//! - anything else: literal text, shown as a heading.
//!
//! Parsing is lenient. A string that is not a URI, or a URI with an unknown
//! scheme, becomes [`Panel::RawString`]. A color with the wrong number of
//! components becomes transparent black. Only file references can fail, and
//! only in ways the user can act on (unreadable file, unsupported type).

#[cfg(test)]
#[path = "reference_test.rs"]
mod tests;

use std::path::Path;

use url::Url;

use crate::consts::COLOR_SCHEME_PREFIX;
use crate::panel::{Color, Panel, PanelError};

/// Resolve a persisted reference into a panel.
///
/// # Errors
///
/// Returns a [`PanelError`] only for `file://` references whose file cannot
/// be read or has an unsupported extension.
pub fn resolve_reference(reference: &str) -> Result<Panel, PanelError> {
    let Ok(uri) = Url::parse(reference) else {
        return Ok(Panel::RawString(reference.to_string()));
    };

    match uri.scheme() {
        "file" => resolve_file(&uri),
        "color" => {
            // The scheme matched case-insensitively, so skip it by length.
            let body = reference.get(COLOR_SCHEME_PREFIX.len()..).unwrap_or_default();
            Ok(Panel::Color(parse_color(body)))
        }
        _ => Ok(Panel::RawString(reference.to_string())),
    }
}

fn resolve_file(uri: &Url) -> Result<Panel, PanelError> {
    let path = uri.to_file_path().map_err(|()| PanelError::InvalidFileUri(uri.to_string()))?;
    let bytes = std::fs::read(&path).map_err(|source| PanelError::Read { path: path.display().to_string(), source })?;
    Panel::from_file(&file_name(&path), bytes)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse the `r,g,b,a` body of a color reference. Anything other than four
/// components yields [`Color::TRANSPARENT`]; a component that is not an
/// integer reads as 0 and one above 65535 saturates.
#[must_use]
pub fn parse_color(body: &str) -> Color {
    let parts: Vec<&str> = body.split(',').collect();
    let [r, g, b, a] = parts.as_slice() else {
        return Color::TRANSPARENT;
    };
    Color::new(channel(r), channel(g), channel(b), channel(a))
}

fn channel(raw: &str) -> u16 {
    let value: i64 = raw.trim().parse().unwrap_or(0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = value.clamp(0, i64::from(u16::MAX)) as u16;
    clamped
}

/// Encode a color's channels as `r,g,b,a`. Inverse of [`parse_color`].
#[must_use]
pub fn format_color(color: Color) -> String {
    let [r, g, b, a] = color.channels();
    format!("{r},{g},{b},{a}")
}

/// Full persisted reference for a color panel.
#[must_use]
pub fn color_reference(color: Color) -> String {
    format!("{COLOR_SCHEME_PREFIX}{}", format_color(color))
}

/// File URI reference for a local path. Relative paths are resolved against
/// the current directory.
///
/// # Errors
///
/// Returns [`PanelError::InvalidFileUri`] if the path cannot be expressed
/// as a file URI.
pub fn file_reference(path: &Path) -> Result<Url, PanelError> {
    let absolute = std::path::absolute(path)
        .map_err(|source| PanelError::Read { path: path.display().to_string(), source })?;
    Url::from_file_path(&absolute).map_err(|()| PanelError::InvalidFileUri(absolute.display().to_string()))
}
