//! Preference store: the string-keyed key/value collaborator boards persist to.
//!
//! DESIGN
//! ======
//! Boards never touch storage directly; they go through [`Preferences`] so
//! the host can pick where state lives. Two stores ship with the crate:
//! [`MemoryPreferences`] for tests and throwaway sessions, and
//! [`FilePreferences`] which keeps a JSON object on disk.
//!
//! Keys used by boards are `{id}.name` (string), `{id}.items` (string list)
//! and `currentID` (string).

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

mod file;

use std::collections::HashMap;

pub use file::FilePreferences;

use crate::error::ErrorCode;

#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("preference store io failed at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("preference store at {path} is not valid JSON: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ErrorCode for PrefsError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "E_PREFS_IO",
            Self::Parse { .. } => "E_PREFS_PARSE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

/// String-keyed preference storage.
///
/// Reads never fail: a missing key or a key holding the other value type
/// reads as absent. Writes either fully succeed or leave the store as it was.
pub trait Preferences {
    fn string(&self, key: &str) -> Option<String>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set_string(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;

    fn string_list(&self, key: &str) -> Vec<String>;

    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    fn set_string_list(&mut self, key: &str, values: &[String]) -> Result<(), PrefsError>;
}

/// A stored preference value.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Text(String),
    List(Vec<String>),
}

impl Entry {
    fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s.clone()),
            Self::List(_) => None,
        }
    }

    fn as_list(&self) -> Vec<String> {
        match self {
            Self::List(items) => items.clone(),
            Self::Text(_) => Vec::new(),
        }
    }
}

/// In-memory store. Writes always succeed.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    entries: HashMap<String, Entry>,
}

impl MemoryPreferences {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Preferences for MemoryPreferences {
    fn string(&self, key: &str) -> Option<String> {
        self.entries.get(key).and_then(Entry::as_text)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.entries.insert(key.to_string(), Entry::Text(value.to_string()));
        Ok(())
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        self.entries.get(key).map(Entry::as_list).unwrap_or_default()
    }

    fn set_string_list(&mut self, key: &str, values: &[String]) -> Result<(), PrefsError> {
        self.entries.insert(key.to_string(), Entry::List(values.to_vec()));
        Ok(())
    }
}
