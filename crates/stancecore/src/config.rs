//! Tool configuration
//!
//! Read once at startup from a JSON file. Every field has a default, so a
//! missing or partial file is fine.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::StanceError;

/// Keys the toggle chord can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Ctrl,
    Shift,
    Alt,
    S,
    T,
    W,
    F6,
    F7,
    F8,
}

/// Two held modifiers plus a trigger key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleChord {
    pub modifiers: [Key; 2],
    pub trigger: Key,
}

impl Default for ToggleChord {
    fn default() -> Self {
        ToggleChord { modifiers: [Key::Ctrl, Key::Shift], trigger: Key::W }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StanceConfig {
    /// Where presets are stored
    pub preset_path: PathBuf,
    /// Chord that shows and hides the panel
    pub toggle: ToggleChord,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`
    pub log_level: String,
}

impl Default for StanceConfig {
    fn default() -> Self {
        Self {
            preset_path: PathBuf::from("stance_presets.json"),
            toggle: ToggleChord::default(),
            log_level: "info".to_string(),
        }
    }
}

impl StanceConfig {
    pub fn with_preset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.preset_path = path.into();
        self
    }

    pub fn with_toggle(mut self, toggle: ToggleChord) -> Self {
        self.toggle = toggle;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Parsed log level, `Info` if the string is not recognised
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    /// Read a config file. A missing file yields `Ok(None)`.
    pub fn from_file(path: &Path) -> Result<Option<Self>, StanceError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StanceError::ConfigIo { path: path.to_path_buf(), source }),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StanceError::ConfigParse { path: path.to_path_buf(), source })
    }

    /// Level to start logging at, before the outcome of reading the file is reported
    pub fn startup_level(loaded: &Result<Option<Self>, StanceError>) -> LevelFilter {
        match loaded {
            Ok(Some(config)) => config.level_filter(),
            _ => LevelFilter::Info,
        }
    }

    /// Read a config file, falling back to defaults on any problem
    pub fn load_or_default(path: &Path) -> Self {
        Self::resolve(Self::from_file(path), path)
    }

    /// Turn the result of [`from_file`](Self::from_file) into a config,
    /// logging why defaults were used. Call once logging is set up.
    pub fn resolve(loaded: Result<Option<Self>, StanceError>, path: &Path) -> Self {
        match loaded {
            Ok(Some(config)) => config,
            Ok(None) => {
                info!("no config at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                warn!("{err}; using default config");
                Self::default()
            }
        }
    }
}
