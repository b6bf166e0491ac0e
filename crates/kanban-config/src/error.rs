//! Error types for configuration operations.
//!
//! # Design
//! - Messages stay constant; context travels in structured fields.
//! - Unknown boards are not errors; see `BoardConfigStore::get`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Building the public JSON for a configuration value failed.
    #[error("failed to serialize public configuration")]
    Serialization {
        /// Configuration section being serialized (`global`, `board`, ...).
        section: &'static str,
        /// Source serde error.
        source: serde_json::Error,
    },
    /// Field contained an invalid value.
    #[error("invalid configuration field")]
    InvalidField {
        /// Section that failed validation.
        section: &'static str,
        /// Field that failed validation.
        field: &'static str,
        /// Offending value when available.
        value: Option<String>,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Board identifier was rejected.
    #[error("invalid board identifier")]
    InvalidBoardId {
        /// Identifier supplied by the caller.
        value: String,
        /// Machine-readable reason for the failure.
        reason: &'static str,
    },
    /// Board already exists.
    #[error("board already exists")]
    DuplicateBoard {
        /// Identifier of the existing board.
        board: String,
    },
    /// File system operation failed.
    #[error("filesystem operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// Seed document could not be parsed.
    #[error("failed to parse configuration seed")]
    Parse {
        /// Path of the seed document.
        path: PathBuf,
        /// Source serde error.
        source: serde_json::Error,
    },
}

/// Convenience alias for configuration results.
pub type ConfigResult<T> = Result<T, ConfigError>;
