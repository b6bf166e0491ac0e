#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! In-process configuration store for the board server.
//!
//! Layout: `model.rs` (typed config values), `view.rs` (public JSON and
//! fingerprints), `global.rs`, `board_list.rs` and `board_configs.rs` (the
//! lock-guarded stores), `metaboard.rs` (the constant aggregator view),
//! `validate.rs`/`loader.rs` (admin-side checks and seed files) and
//! `service.rs` (`ConfigService` + `ConfigFacade`).

pub mod board_configs;
pub mod board_list;
pub mod defaults;
pub mod error;
pub mod global;
pub mod loader;
pub mod metaboard;
pub mod model;
pub mod service;
pub mod validate;
pub mod view;

mod sync;

pub use board_configs::BoardConfigStore;
pub use board_list::BoardListStore;
pub use error::{ConfigError, ConfigResult};
pub use global::{GlobalConfigStore, GlobalSnapshot};
pub use loader::{ConfigSeed, load_seed};
pub use metaboard::{METABOARD_ID, metaboard_view};
pub use model::{
    BoardConfig, BoardConfigEntry, BoardPublicConfig, GlobalConfig, PostParseConfigs,
    PublicConfig, Toggle,
};
pub use service::{ConfigFacade, ConfigService};
pub use view::{ClientView, Fingerprint};
