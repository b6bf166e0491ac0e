//! Prometheus-backed metrics registry for the configuration stores.
//!
//! # Design
//! - Encapsulates collector registration to keep the public API small.
//! - Counts publishes by scope so fingerprint churn is visible per store.

use std::sync::Arc;

use prometheus::{IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::error::{MetricStep, Result, TelemetryError};

/// Store that published a new client view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishScope {
    /// Global configuration.
    Global,
    /// A single board's configuration.
    Board,
    /// The whole board set.
    Boards,
}

impl PublishScope {
    /// Label value used in `config_publishes_total`.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Board => "board",
            Self::Boards => "boards",
        }
    }
}

/// Prometheus-backed metrics registry shared across services.
#[derive(Clone)]
pub struct Metrics {
    inner: Arc<MetricsInner>,
}

struct MetricsInner {
    registry: Registry,
    config_publishes_total: IntCounterVec,
    board_removals_total: IntCounter,
    configured_boards: IntGauge,
}

/// Snapshot of the registered collectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Global config publishes.
    pub global_publishes: u64,
    /// Single-board publishes.
    pub board_publishes: u64,
    /// Board set reloads.
    pub board_set_reloads: u64,
    /// Boards removed.
    pub board_removals: u64,
    /// Boards currently configured.
    pub configured_boards: i64,
}

impl Metrics {
    /// Construct a new metrics registry with the standard collectors registered.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the Prometheus collectors cannot be
    /// built or registered.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let config_publishes_total = IntCounterVec::new(
            Opts::new(
                "config_publishes_total",
                "Configuration client views published by scope",
            ),
            &["scope"],
        )
        .map_err(|source| metric_error("config_publishes_total", MetricStep::Build, source))?;
        let board_removals_total = IntCounter::with_opts(Opts::new(
            "board_removals_total",
            "Boards removed with their configuration",
        ))
        .map_err(|source| metric_error("board_removals_total", MetricStep::Build, source))?;
        let configured_boards = IntGauge::with_opts(Opts::new(
            "configured_boards",
            "Boards with a published configuration",
        ))
        .map_err(|source| metric_error("configured_boards", MetricStep::Build, source))?;

        register(&registry, "config_publishes_total", &config_publishes_total)?;
        register(&registry, "board_removals_total", &board_removals_total)?;
        register(&registry, "configured_boards", &configured_boards)?;

        Ok(Self {
            inner: Arc::new(MetricsInner {
                registry,
                config_publishes_total,
                board_removals_total,
                configured_boards,
            }),
        })
    }

    /// Count a published client view.
    pub fn record_publish(&self, scope: PublishScope) {
        self.inner
            .config_publishes_total
            .with_label_values(&[scope.as_label()])
            .inc();
    }

    /// Count a removed board.
    pub fn record_board_removal(&self) {
        self.inner.board_removals_total.inc();
    }

    /// Set the configured board gauge.
    pub fn set_configured_boards(&self, count: usize) {
        self.inner
            .configured_boards
            .set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Render the metrics registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded.
    pub fn render(&self) -> Result<String> {
        TextEncoder::new()
            .encode_to_string(&self.inner.registry.gather())
            .map_err(|source| metric_error("registry", MetricStep::Render, source))
    }

    /// Take a point-in-time snapshot of the registered collectors.
    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        let publishes = |scope: PublishScope| {
            self.inner
                .config_publishes_total
                .with_label_values(&[scope.as_label()])
                .get()
        };
        MetricsSnapshot {
            global_publishes: publishes(PublishScope::Global),
            board_publishes: publishes(PublishScope::Board),
            board_set_reloads: publishes(PublishScope::Boards),
            board_removals: self.inner.board_removals_total.get(),
            configured_boards: self.inner.configured_boards.get(),
        }
    }
}

fn register<C>(registry: &Registry, name: &'static str, collector: &C) -> Result<()>
where
    C: prometheus::core::Collector + Clone + 'static,
{
    registry
        .register(Box::new(collector.clone()))
        .map_err(|source| metric_error(name, MetricStep::Register, source))
}

const fn metric_error(
    metric: &'static str,
    step: MetricStep,
    source: prometheus::Error,
) -> TelemetryError {
    TelemetryError::Metric {
        metric,
        step,
        source,
    }
}
