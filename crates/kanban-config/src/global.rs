//! Global configuration store.
//!
//! # Design
//! - The config and its client view live in one immutable snapshot behind a
//!   single `RwLock`; readers clone an `Arc` and never see a mixed pair.
//! - JSON is built before the write lock is taken, so a failed build leaves
//!   the published snapshot untouched.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::ConfigResult;
use crate::model::GlobalConfig;
use crate::sync;
use crate::view::{ClientView, Fingerprint};

/// Section label used in serialization errors and logs.
const SECTION: &str = "global";

/// Immutable pairing of a published global config and its client view.
#[derive(Debug)]
pub struct GlobalSnapshot {
    config: Arc<GlobalConfig>,
    view: Arc<ClientView>,
}

impl GlobalSnapshot {
    /// Published configuration.
    #[must_use]
    pub const fn config(&self) -> &Arc<GlobalConfig> {
        &self.config
    }

    /// Client view published alongside [`Self::config`].
    #[must_use]
    pub const fn view(&self) -> &Arc<ClientView> {
        &self.view
    }
}

/// Holds the current global configuration.
#[derive(Debug)]
pub struct GlobalConfigStore {
    current: RwLock<Arc<GlobalSnapshot>>,
}

impl GlobalConfigStore {
    /// Create a store publishing `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the public JSON for `config` cannot be built.
    pub fn new(config: GlobalConfig) -> ConfigResult<Self> {
        let snapshot = Self::prepare(config)?;
        Ok(Self {
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Create a store publishing [`GlobalConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if the public JSON for the defaults cannot be built.
    pub fn with_defaults() -> ConfigResult<Self> {
        Self::new(GlobalConfig::default())
    }

    /// Current configuration. Callers share it read-only.
    #[must_use]
    pub fn get(&self) -> Arc<GlobalConfig> {
        Arc::clone(&self.snapshot().config)
    }

    /// Current configuration and client view, read together.
    #[must_use]
    pub fn snapshot(&self) -> Arc<GlobalSnapshot> {
        Arc::clone(&*sync::read(&self.current))
    }

    /// Last published public JSON and fingerprint.
    #[must_use]
    pub fn client_view(&self) -> Arc<ClientView> {
        Arc::clone(&self.snapshot().view)
    }

    /// Replace the configuration and publish its recomputed client view.
    ///
    /// # Errors
    ///
    /// Returns an error if the public JSON cannot be built; the previous
    /// snapshot stays current.
    pub fn set(&self, config: GlobalConfig) -> ConfigResult<Fingerprint> {
        let snapshot = Self::prepare(config)?;
        let fingerprint = snapshot.view.fingerprint().clone();
        *sync::write(&self.current) = Arc::new(snapshot);
        debug!(section = SECTION, fingerprint = %fingerprint, "global configuration published");
        Ok(fingerprint)
    }

    /// Inject a client view without a config object, keeping the current
    /// config. Intended for tests and bootstrap only.
    pub fn set_client_view(&self, json: Vec<u8>, fingerprint: Fingerprint) {
        let view = Arc::new(ClientView::from_parts(json, fingerprint));
        let mut current = sync::write(&self.current);
        let config = Arc::clone(&current.config);
        *current = Arc::new(GlobalSnapshot { config, view });
    }

    fn prepare(config: GlobalConfig) -> ConfigResult<GlobalSnapshot> {
        let view = ClientView::build(SECTION, &config.public)?;
        Ok(GlobalSnapshot {
            config: Arc::new(config),
            view: Arc::new(view),
        })
    }
}
