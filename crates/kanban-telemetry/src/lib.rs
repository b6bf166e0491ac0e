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

//! Logging and metrics shared across the workspace.
//!
//! Layout: `init.rs` (subscriber installation and build metadata),
//! `metrics.rs` (Prometheus registry for the configuration stores),
//! `error.rs` (telemetry error type).

pub mod error;
pub mod init;
pub mod metrics;

pub use error::{MetricStep, Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use metrics::{Metrics, MetricsSnapshot, PublishScope};
