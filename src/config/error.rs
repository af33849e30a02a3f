//! Configuration-specific error types.

use std::path::PathBuf;

/// Errors raised while reading or writing `config.yml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `save` was called before `load` resolved a file location
    #[error("Configuration has no file location; load it first")]
    NotLoaded,

    #[error("Failed to find home directory")]
    HomeDirectoryNotFound,

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file exists but is not valid YAML for this configuration
    #[error("Malformed configuration in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create configuration directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode configuration: {0}")]
    Encode(String),

    /// Log level name not recognized
    #[error("Invalid log level '{0}' (expected off, error, warn, info, debug or trace)")]
    InvalidLogLevel(String),
}
