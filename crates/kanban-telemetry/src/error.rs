//! Errors raised while installing logging or maintaining the store metrics.
//!
//! # Design
//! - Metric failures name the collector and the registry step that failed;
//!   the `prometheus` error is kept as the source.
//! - Rendering goes through the same variant with the `registry` metric.

use prometheus::Error as PrometheusError;
use thiserror::Error;
use tracing_subscriber::util::TryInitError;

use crate::init::LogFormat;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Registry step during which a metric failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricStep {
    /// Creating the collector from its options.
    Build,
    /// Adding the collector to the registry.
    Register,
    /// Encoding the registry in the text exposition format.
    Render,
}

impl MetricStep {
    /// Lowercase name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Build => "build",
            Self::Register => "register",
            Self::Render => "render",
        }
    }
}

/// Errors raised by telemetry helpers.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Another log subscriber already owns the process.
    #[error("log subscriber installation failed")]
    LoggingInstall {
        /// Format the rejected subscriber would have used.
        format: LogFormat,
        /// Underlying tracing subscriber error.
        #[source]
        source: TryInitError,
    },
    /// A configuration-store metric could not be set up or rendered.
    #[error("store metric operation failed")]
    Metric {
        /// Collector name, or `registry` when rendering.
        metric: &'static str,
        /// Step that failed.
        step: MetricStep,
        /// Underlying Prometheus error.
        #[source]
        source: PrometheusError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use tracing_subscriber::util::SubscriberInitExt;

    #[test]
    fn metric_error_keeps_context_and_source() {
        let err = TelemetryError::Metric {
            metric: "config_publishes_total",
            step: MetricStep::Register,
            source: PrometheusError::AlreadyReg,
        };
        assert_eq!(err.to_string(), "store metric operation failed");
        assert!(err.source().is_some());
        assert!(matches!(
            err,
            TelemetryError::Metric {
                metric: "config_publishes_total",
                step: MetricStep::Register,
                ..
            }
        ));
    }

    #[test]
    fn second_subscriber_reports_logging_install() {
        let second = tracing_subscriber::registry()
            .try_init()
            .and_then(|()| tracing_subscriber::registry().try_init());
        let Err(source) = second else {
            panic!("a second global subscriber was accepted");
        };
        let err = TelemetryError::LoggingInstall {
            format: LogFormat::Json,
            source,
        };
        assert_eq!(err.to_string(), "log subscriber installation failed");
        assert!(err.source().is_some());
    }

    #[test]
    fn steps_have_log_names() {
        assert_eq!(MetricStep::Build.as_str(), "build");
        assert_eq!(MetricStep::Register.as_str(), "register");
        assert_eq!(MetricStep::Render.as_str(), "render");
    }
}
