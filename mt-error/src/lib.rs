//! Unified error handling for mtrack
//!
//! Errors only come out of the configuration layer. The per-frame touch
//! pipeline reports everything through touch flags and diagnostics instead.

use std::io;
use std::path::PathBuf;

/// Result type alias using MtrackError
pub type Result<T> = std::result::Result<T, MtrackError>;

/// Unified error type for mtrack operations
#[derive(thiserror::Error, Debug)]
pub enum MtrackError {
    // ============================================================================
    // I/O and File System Errors
    // ============================================================================
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: io::Error,
    },

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: io::Error,
    },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    InvalidConfig {
        field: String,
        reason: String,
    },

    #[error("Invalid percentage for {field}: {value} (must be 0-100)")]
    InvalidPercentage {
        field: String,
        value: i32,
    },

    #[error("Invalid calibration range: min {min} must be below max {max}")]
    InvalidCalibration {
        min: i32,
        max: i32,
    },
}

impl MtrackError {
    /// Create a config error from a string
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid config value error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid percentage error
    pub fn invalid_percentage(field: impl Into<String>, value: i32) -> Self {
        Self::InvalidPercentage {
            field: field.into(),
            value,
        }
    }
}
