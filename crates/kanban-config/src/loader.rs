//! Seed documents read at startup.
//!
//! # Design
//! - A seed is a JSON document `{ "global": {...}, "boards": [...] }`; every
//!   field is optional and falls back to the defaults.
//! - Seeds are validated as a whole before any store sees them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{BoardConfig, GlobalConfig};
use crate::validate::{validate_board_set, validate_global};

/// Initial configuration for a fresh process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigSeed {
    /// Global configuration; defaults are kept when absent.
    pub global: Option<GlobalConfig>,
    /// Boards to create, in listing order.
    pub boards: Vec<BoardConfig>,
}

impl ConfigSeed {
    /// Validate the global limits and every board, rejecting repeated ids.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(global) = &self.global {
            validate_global(global)?;
        }
        validate_board_set(&self.boards)
    }
}

/// Read, parse and validate a seed document.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] when the file cannot be read,
/// [`ConfigError::Parse`] when it is not a valid seed document, or a
/// validation error from [`ConfigSeed::validate`].
pub async fn load_seed(path: &Path) -> ConfigResult<ConfigSeed> {
    let bytes = fs::read(path).await.map_err(|source| ConfigError::Io {
        operation: "seed.read",
        path: path.to_path_buf(),
        source,
    })?;
    let seed: ConfigSeed = serde_json::from_slice(&bytes).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    seed.validate()?;
    info!(
        path = %path.display(),
        boards = seed.boards.len(),
        custom_global = seed.global.is_some(),
        "configuration seed loaded"
    );
    Ok(seed)
}
