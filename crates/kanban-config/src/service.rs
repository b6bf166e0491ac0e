//! Shared configuration service and the facade handlers depend on.
//!
//! # Design
//! - `ConfigService` owns the three stores plus the change bus behind one
//!   `Arc`; clones are cheap handles onto the same state.
//! - Every operation is in-memory and bounded, so the facade is synchronous.
//! - Events are published after the stores change and never block them.

use std::sync::Arc;

use kanban_events::{ConfigEvent, EventBus, EventId, EventStream};
use tracing::{info, warn};

use crate::board_configs::BoardConfigStore;
use crate::board_list::BoardListStore;
use crate::error::ConfigResult;
use crate::global::{GlobalConfigStore, GlobalSnapshot};
use crate::loader::ConfigSeed;
use crate::model::{BoardConfig, BoardConfigEntry, GlobalConfig};
use crate::validate::{validate_board_config, validate_board_set};
use crate::view::{ClientView, Fingerprint};

/// Configuration operations available to request handlers and admin paths.
pub trait ConfigFacade: Send + Sync {
    /// Current global configuration.
    fn global(&self) -> Arc<GlobalConfig>;
    /// Replace the global configuration and publish its client view.
    ///
    /// # Errors
    ///
    /// Returns an error if the public JSON cannot be built.
    fn set_global(&self, config: GlobalConfig) -> ConfigResult<Fingerprint>;
    /// Last published global client view.
    fn client_view(&self) -> Arc<ClientView>;
    /// Identifiers of existing boards.
    fn boards(&self) -> Arc<Vec<String>>;
    /// Replace the board list without touching board configs.
    fn set_boards(&self, boards: Vec<String>);
    /// Configuration entry for `id`; the empty entry when unknown.
    fn board(&self, id: &str) -> Arc<BoardConfigEntry>;
    /// Upsert a board's configuration without listing it.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty id or if the public JSON cannot be
    /// built.
    fn set_board(&self, config: BoardConfig) -> ConfigResult<Fingerprint>;
    /// Validate, configure and list a new board. A board that was configured
    /// with [`Self::set_board`] but never listed is replaced and listed.
    ///
    /// # Errors
    ///
    /// Returns a validation error, [`crate::ConfigError::DuplicateBoard`] when
    /// the board is already listed, or a serialization error.
    fn create_board(&self, config: BoardConfig) -> ConfigResult<Fingerprint>;
    /// Remove a board's configuration and listing together. Idempotent.
    fn remove_board(&self, id: &str);
}

#[derive(Debug)]
struct Inner {
    global: GlobalConfigStore,
    board_list: BoardListStore,
    board_configs: BoardConfigStore,
    events: EventBus,
}

/// In-process configuration service backed by lock-guarded stores.
#[derive(Clone, Debug)]
pub struct ConfigService {
    inner: Arc<Inner>,
}

impl ConfigService {
    /// Create a service publishing `global` with no boards.
    ///
    /// # Errors
    ///
    /// Returns an error if the global public JSON cannot be built.
    pub fn new(global: GlobalConfig) -> ConfigResult<Self> {
        Ok(Self {
            inner: Arc::new(Inner {
                global: GlobalConfigStore::new(global)?,
                board_list: BoardListStore::default(),
                board_configs: BoardConfigStore::new(),
                events: EventBus::new(),
            }),
        })
    }

    /// Create a service publishing the default global configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the default public JSON cannot be built.
    pub fn with_defaults() -> ConfigResult<Self> {
        Self::new(GlobalConfig::default())
    }

    /// Create a service from a seed document.
    ///
    /// # Errors
    ///
    /// Returns a validation or serialization error from the seed.
    pub fn from_seed(seed: ConfigSeed) -> ConfigResult<Self> {
        let service = Self::with_defaults()?;
        service.apply_seed(seed)?;
        Ok(service)
    }

    /// Validate and apply a seed: the global config when present, then the
    /// full board set.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure or a serialization error. The
    /// global config may already be applied when the board set fails to
    /// serialize.
    pub fn apply_seed(&self, seed: ConfigSeed) -> ConfigResult<()> {
        seed.validate()?;
        if let Some(global) = seed.global {
            self.set_global(global)?;
        }
        self.reload_boards(seed.boards)?;
        Ok(())
    }

    /// Replace every board's config and the board list in one critical
    /// section. Boards not in `configs` disappear.
    ///
    /// # Errors
    ///
    /// Returns a validation error, a duplicate-board error, or a
    /// serialization error; nothing is published on error.
    pub fn reload_boards(&self, configs: Vec<BoardConfig>) -> ConfigResult<Arc<Vec<String>>> {
        validate_board_set(&configs)?;
        let ids = self
            .inner
            .board_configs
            .replace_all(configs, &self.inner.board_list)?;
        info!(count = ids.len(), "board set reloaded");
        self.emit(ConfigEvent::BoardsReloaded { count: ids.len() });
        Ok(ids)
    }

    /// Listed boards that have no configuration entry.
    #[must_use]
    pub fn unconfigured_boards(&self) -> Vec<String> {
        self.inner
            .board_configs
            .unconfigured_in(&self.inner.board_list)
    }

    /// Global configuration and client view, read together.
    #[must_use]
    pub fn global_snapshot(&self) -> Arc<GlobalSnapshot> {
        self.inner.global.snapshot()
    }

    /// Inject a global client view without a config object. For tests and
    /// bootstrap only.
    pub fn set_client_view(&self, json: Vec<u8>, fingerprint: Fingerprint) {
        self.inner.global.set_client_view(json, fingerprint);
    }

    /// Number of configured boards.
    #[must_use]
    pub fn configured_boards(&self) -> usize {
        self.inner.board_configs.len()
    }

    /// Change bus shared by every clone of this service.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Subscribe to change events, replaying those newer than `since`.
    #[must_use]
    pub fn subscribe(&self, since: Option<EventId>) -> EventStream {
        self.inner.events.subscribe(since)
    }

    fn emit(&self, event: ConfigEvent) {
        let _ = self.inner.events.publish(event);
    }
}

impl ConfigFacade for ConfigService {
    fn global(&self) -> Arc<GlobalConfig> {
        self.inner.global.get()
    }

    fn set_global(&self, config: GlobalConfig) -> ConfigResult<Fingerprint> {
        let fingerprint = self.inner.global.set(config)?;
        self.emit(ConfigEvent::GlobalPublished {
            fingerprint: fingerprint.to_string(),
        });
        Ok(fingerprint)
    }

    fn client_view(&self) -> Arc<ClientView> {
        self.inner.global.client_view()
    }

    fn boards(&self) -> Arc<Vec<String>> {
        self.inner.board_list.get()
    }

    fn set_boards(&self, boards: Vec<String>) {
        self.inner.board_list.set(boards);
        let unconfigured = self.unconfigured_boards();
        if !unconfigured.is_empty() {
            warn!(boards = ?unconfigured, "listed boards have no configuration");
        }
    }

    fn board(&self, id: &str) -> Arc<BoardConfigEntry> {
        self.inner.board_configs.get(id)
    }

    fn set_board(&self, config: BoardConfig) -> ConfigResult<Fingerprint> {
        let entry = self.inner.board_configs.set(config)?;
        let fingerprint = entry.fingerprint().clone();
        self.emit(ConfigEvent::BoardPublished {
            board: entry.id().to_string(),
            fingerprint: fingerprint.to_string(),
        });
        Ok(fingerprint)
    }

    fn create_board(&self, config: BoardConfig) -> ConfigResult<Fingerprint> {
        validate_board_config(&config)?;
        let entry = self
            .inner
            .board_configs
            .insert_listed(config, &self.inner.board_list)?;
        let fingerprint = entry.fingerprint().clone();
        info!(board = %entry.id(), fingerprint = %fingerprint, "board created");
        self.emit(ConfigEvent::BoardPublished {
            board: entry.id().to_string(),
            fingerprint: fingerprint.to_string(),
        });
        Ok(fingerprint)
    }

    fn remove_board(&self, id: &str) {
        if self
            .inner
            .board_configs
            .remove(id, &self.inner.board_list)
        {
            info!(board = %id, "board removed");
            self.emit(ConfigEvent::BoardRemoved {
                board: id.to_string(),
            });
        }
    }
}
