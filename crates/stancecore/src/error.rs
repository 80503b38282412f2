use std::path::PathBuf;

/// Errors raised by the stance model and its configuration
#[derive(Debug, thiserror::Error)]
pub enum StanceError {
    #[error("wheel index {0} is out of range (expected 1..=4)")]
    InvalidWheel(usize),

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised while reading or writing the preset file
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("preset file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preset file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("preset '{name}' holds a non-finite value and cannot be stored")]
    NonFinite { name: String },

    #[error("failed to serialize presets: {0}")]
    Serialize(#[from] serde_json::Error),
}
