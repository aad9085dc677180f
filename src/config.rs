//! Runtime configuration parsed from environment variables.

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::consts::{DEFAULT_CONTAINER_WIDTH, DEFAULT_PADDING};
use crate::error::ErrorCode;

pub const PREFS_FILE_NAME: &str = "preferences.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative number, got '{value}'")]
    InvalidNumber { var: &'static str, value: String },
    #[error("no home directory to place the preference store in; set VISIONBOARD_PREFS")]
    NoConfigDir,
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNumber { .. } => "E_CONFIG_PARSE",
            Self::NoConfigDir => "E_CONFIG_DIR",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// JSON file backing the preference store.
    pub prefs_path: PathBuf,
    /// Board to open instead of the stored `currentID`.
    pub board_id: Option<String>,
    pub padding: f64,
    /// Container width used when the host has not been resized yet.
    pub container_width: f64,
}

impl AppConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `VISIONBOARD_PREFS`: preference store path (default: platform
    ///   config dir + `preferences.json`)
    /// - `VISIONBOARD_BOARD_ID`: board to open
    /// - `VISIONBOARD_PADDING`: default 4
    /// - `VISIONBOARD_WIDTH`: default 360
    ///
    /// # Errors
    ///
    /// Returns an error for unparseable numbers, or when no preference path
    /// is given and the platform has no config directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let prefs_path = match lookup("VISIONBOARD_PREFS").filter(|p| !p.is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_prefs_path()?,
        };
        let board_id = lookup("VISIONBOARD_BOARD_ID").filter(|id| !id.is_empty());
        let padding = parse_f64("VISIONBOARD_PADDING", lookup("VISIONBOARD_PADDING"), DEFAULT_PADDING)?;
        let container_width = parse_f64("VISIONBOARD_WIDTH", lookup("VISIONBOARD_WIDTH"), DEFAULT_CONTAINER_WIDTH)?;

        Ok(Self { prefs_path, board_id, padding, container_width })
    }
}

fn parse_f64(var: &'static str, raw: Option<String>, default: f64) -> Result<f64, ConfigError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(ConfigError::InvalidNumber { var, value: raw }),
    }
}

fn default_prefs_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("", "", "visionboard")
        .map(|dirs| dirs.config_dir().join(PREFS_FILE_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
