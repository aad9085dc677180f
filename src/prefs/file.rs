//! JSON-file preference store.
//!
//! The whole store is one JSON object. Every write serializes the updated
//! object to a sibling `.tmp` file and renames it over the original, so a
//! crash mid-write leaves the previous contents intact. The in-memory copy
//! only changes after the rename succeeds.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::debug;

use super::{Entry, Preferences, PrefsError};

#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    entries: BTreeMap<String, Entry>,
}

impl FilePreferences {
    /// Open the store at `path`. A missing file is an empty store; it is
    /// created on the first write.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PrefsError> {
        let path = path.into();
        let entries = match std::fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|source| PrefsError::Parse { path: path.display().to_string(), source })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PrefsError::Io { path: path.display().to_string(), source }),
        };
        debug!(path = %path.display(), keys = entries.len(), "opened preference store");
        Ok(Self { path, entries })
    }

    fn commit(&mut self, key: &str, entry: Entry) -> Result<(), PrefsError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), entry);
        self.write(&next)?;
        self.entries = next;
        Ok(())
    }

    fn write(&self, entries: &BTreeMap<String, Entry>) -> Result<(), PrefsError> {
        let io_err = |source| PrefsError::Io { path: self.path.display().to_string(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_vec_pretty(entries)
            .map_err(|source| PrefsError::Parse { path: self.path.display().to_string(), source })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, json).map_err(io_err)?;
        if let Err(source) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(io_err(source));
        }
        Ok(())
    }
}

impl Preferences for FilePreferences {
    fn string(&self, key: &str) -> Option<String> {
        self.entries.get(key).and_then(Entry::as_text)
    }

    fn set_string(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.commit(key, Entry::Text(value.to_string()))
    }

    fn string_list(&self, key: &str) -> Vec<String> {
        self.entries.get(key).map(Entry::as_list).unwrap_or_default()
    }

    fn set_string_list(&mut self, key: &str, values: &[String]) -> Result<(), PrefsError> {
        self.commit(key, Entry::List(values.to_vec()))
    }
}
