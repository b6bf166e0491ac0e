//! Per-board configuration store.
//!
//! # Design
//! - Entries carry their public JSON and fingerprint so page renders never
//!   serialize on the read path.
//! - Unknown boards resolve to a shared empty entry instead of an error;
//!   callers check [`BoardConfigEntry::is_configured`].
//! - Operations that also touch the board list take this store's lock first
//!   and the list lock second, and release both together.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::board_list::{self, BoardListStore};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{BoardConfig, BoardConfigEntry};
use crate::sync;
use crate::view::ClientView;

/// Section label used in serialization errors and logs.
const SECTION: &str = "board";

impl BoardConfigEntry {
    /// Build an entry with the derived view of `config.public`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBoardId`] for an empty id, which is
    /// reserved for the unknown-board entry, or [`ConfigError::Serialization`]
    /// if the public JSON cannot be built.
    pub fn build(config: BoardConfig) -> ConfigResult<Self> {
        if config.id.is_empty() {
            return Err(ConfigError::InvalidBoardId {
                value: String::new(),
                reason: "empty",
            });
        }
        let view = ClientView::build(SECTION, &config.public)?;
        Ok(Self { config, view })
    }
}

/// Board identifier to configuration entry.
#[derive(Debug, Default)]
pub struct BoardConfigStore {
    entries: RwLock<HashMap<String, Arc<BoardConfigEntry>>>,
    unknown: Arc<BoardConfigEntry>,
}

impl BoardConfigStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for `id`, or the empty default entry when the board is unknown.
    #[must_use]
    pub fn get(&self, id: &str) -> Arc<BoardConfigEntry> {
        sync::read(&self.entries)
            .get(id)
            .map_or_else(|| Arc::clone(&self.unknown), Arc::clone)
    }

    /// Whether `id` has a configuration entry.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        sync::read(&self.entries).contains_key(id)
    }

    /// Number of configured boards.
    #[must_use]
    pub fn len(&self) -> usize {
        sync::read(&self.entries).len()
    }

    /// Whether no board is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        sync::read(&self.entries).is_empty()
    }

    /// Upsert the configuration for `config.id`. Nothing but the id being
    /// non-empty is checked.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBoardId`] for an empty id, or
    /// [`ConfigError::Serialization`] if the public JSON cannot be built; any
    /// existing entry is left untouched.
    pub fn set(&self, config: BoardConfig) -> ConfigResult<Arc<BoardConfigEntry>> {
        let entry = Arc::new(BoardConfigEntry::build(config)?);
        sync::write(&self.entries).insert(entry.id().to_string(), Arc::clone(&entry));
        debug!(board = %entry.id(), fingerprint = %entry.fingerprint(), "board configuration published");
        Ok(entry)
    }

    /// Store a board's entry and list it in `boards` within one critical
    /// section. A board configured earlier but never listed is overwritten
    /// and listed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateBoard`] if the board is already listed,
    /// or a [`BoardConfigEntry::build`] error. Neither store changes on error.
    pub fn insert_listed(
        &self,
        config: BoardConfig,
        boards: &BoardListStore,
    ) -> ConfigResult<Arc<BoardConfigEntry>> {
        let entry = Arc::new(BoardConfigEntry::build(config)?);
        let mut entries = sync::write(&self.entries);
        let mut list = boards.lock();
        if list.iter().any(|id| id == entry.id()) {
            return Err(ConfigError::DuplicateBoard {
                board: entry.id().to_string(),
            });
        }
        entries.insert(entry.id().to_string(), Arc::clone(&entry));
        board_list::add_id(&mut list, entry.id());
        drop(list);
        drop(entries);
        Ok(entry)
    }

    /// Delete the entry for `id` and drop it from `boards` within one critical
    /// section. Returns `false` when neither store knew the board.
    pub fn remove(&self, id: &str, boards: &BoardListStore) -> bool {
        let mut entries = sync::write(&self.entries);
        let mut list = boards.lock();
        let had_entry = entries.remove(id).is_some();
        let was_listed = board_list::remove_id(&mut list, id);
        had_entry || was_listed
    }

    /// Replace every entry with `configs` and list exactly their ids, in
    /// order, within one critical section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialization`] if any public JSON cannot be
    /// built; nothing is published in that case.
    pub fn replace_all(
        &self,
        configs: Vec<BoardConfig>,
        boards: &BoardListStore,
    ) -> ConfigResult<Arc<Vec<String>>> {
        let mut next = HashMap::with_capacity(configs.len());
        let mut ids = Vec::with_capacity(configs.len());
        for config in configs {
            let entry = BoardConfigEntry::build(config)?;
            let id = entry.id().to_string();
            if next.insert(id.clone(), Arc::new(entry)).is_none() {
                ids.push(id);
            }
        }
        let ids = Arc::new(ids);

        let mut entries = sync::write(&self.entries);
        let mut list = boards.lock();
        *entries = next;
        *list = Arc::clone(&ids);
        Ok(ids)
    }

    /// Ids listed in `boards` that have no entry here, in list order.
    #[must_use]
    pub fn unconfigured_in(&self, boards: &BoardListStore) -> Vec<String> {
        let entries = sync::read(&self.entries);
        let list = boards.get();
        list.iter()
            .filter(|id| !entries.contains_key(id.as_str()))
            .cloned()
            .collect()
    }
}
