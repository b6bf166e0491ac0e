//! Sample configurations and seed files.

use std::io::Write as _;

use anyhow::Context as _;
use kanban_config::{BoardConfig, ConfigSeed, GlobalConfig};
use tempfile::NamedTempFile;

/// Default global configuration with a distinguishing salt.
#[must_use]
pub fn sample_global(salt: &str) -> GlobalConfig {
    GlobalConfig {
        salt: salt.to_string(),
        ..GlobalConfig::default()
    }
}

/// Board with the default answer set and the given title.
#[must_use]
pub fn sample_board(id: &str, title: &str) -> BoardConfig {
    let mut config = BoardConfig::new(id);
    config.public.title = title.to_string();
    config
}

/// Write `seed` as JSON to a temporary file that lives as long as the handle.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_seed(seed: &ConfigSeed) -> anyhow::Result<NamedTempFile> {
    write_raw_seed(&serde_json::to_vec(seed).context("serialize seed")?)
}

/// Write raw bytes to a temporary seed file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_raw_seed(bytes: &[u8]) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("create seed file")?;
    file.write_all(bytes).context("write seed file")?;
    file.flush().context("flush seed file")?;
    Ok(file)
}
