use std::future::Future;
use std::path::PathBuf;

use kanban_config::{ConfigFacade, ConfigService, METABOARD_ID, load_seed, metaboard_view};
use kanban_events::ConfigEvent;
use kanban_telemetry::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, Metrics, PublishScope, init_logging,
};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

const SEED_PATH_ENV: &str = "KANBAN_SEED_PATH";
const REQUIRE_SEED_ENV: &str = "KANBAN_REQUIRE_SEED";
const ALLOWED_ORIGIN_ENV: &str = "KANBAN_ALLOWED_ORIGIN";
const LOG_FORMAT_ENV: &str = "KANBAN_LOG_FORMAT";
const BUILD_SHA_ENV: &str = "KANBAN_BUILD_SHA";

/// Process settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// Seed document applied to the stores, if any.
    pub seed_path: Option<PathBuf>,
    /// Client origin accepted for websocket and upload requests. Immutable
    /// once the process starts.
    pub allowed_origin: Option<String>,
    /// Log output format.
    pub log_format: LogFormat,
    /// Build identifier recorded in logs.
    pub build_sha: String,
}

impl AppSettings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing or a value is invalid.
    pub fn from_env() -> AppResult<Self> {
        Self::from_values(
            env_value(SEED_PATH_ENV),
            env_value(ALLOWED_ORIGIN_ENV),
            env_value(LOG_FORMAT_ENV),
            env_value(BUILD_SHA_ENV),
            env_flag(REQUIRE_SEED_ENV),
        )
    }

    /// Build settings from raw values as they appear in the environment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::MissingEnv`] when a seed is required but absent,
    /// or [`AppError::InvalidConfig`] for an unusable origin.
    pub fn from_values(
        seed_path: Option<String>,
        allowed_origin: Option<String>,
        log_format: Option<String>,
        build_sha: Option<String>,
        require_seed: bool,
    ) -> AppResult<Self> {
        if require_seed && seed_path.is_none() {
            return Err(AppError::MissingEnv {
                name: SEED_PATH_ENV,
            });
        }
        if let Some(origin) = &allowed_origin {
            validate_origin(origin)?;
        }
        Ok(Self {
            seed_path: seed_path.map(PathBuf::from),
            allowed_origin,
            log_format: LogFormat::from_env_value(log_format.as_deref()),
            build_sha: build_sha.unwrap_or_else(|| "dev".to_string()),
        })
    }
}

/// Dependencies required to run the application.
pub struct BootstrapDependencies {
    settings: AppSettings,
    config: ConfigService,
    telemetry: Metrics,
}

impl BootstrapDependencies {
    /// Build the configuration service, applying the seed when one is set.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed cannot be loaded or applied, or if the
    /// metrics registry cannot be built.
    pub async fn load(settings: AppSettings) -> AppResult<Self> {
        let config = match &settings.seed_path {
            Some(path) => {
                let seed = load_seed(path)
                    .await
                    .map_err(|err| AppError::config("seed.load", err))?;
                ConfigService::from_seed(seed)
                    .map_err(|err| AppError::config("config_service.from_seed", err))?
            }
            None => ConfigService::with_defaults()
                .map_err(|err| AppError::config("config_service.with_defaults", err))?,
        };
        let telemetry =
            Metrics::new().map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
        Ok(Self {
            settings,
            config,
            telemetry,
        })
    }

    /// Settings the dependencies were built from.
    #[must_use]
    pub const fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Shared configuration service.
    #[must_use]
    pub const fn config(&self) -> &ConfigService {
        &self.config
    }

    /// Metrics registry updated from configuration events.
    #[must_use]
    pub const fn telemetry(&self) -> &Metrics {
        &self.telemetry
    }
}

/// Entry point for the application boot sequence.
///
/// # Errors
///
/// Returns an error if settings, logging, seeding or the shutdown signal fail.
pub async fn run_app() -> AppResult<()> {
    let settings = AppSettings::from_env()?;
    init_logging(&LoggingConfig {
        level: DEFAULT_LOG_LEVEL,
        format: settings.log_format,
        build_sha: &settings.build_sha,
    })
    .map_err(|err| AppError::telemetry("telemetry.init", err))?;

    let dependencies = BootstrapDependencies::load(settings).await?;
    run_app_with(dependencies, shutdown_signal()).await
}

/// Boot sequence over injected dependencies; runs until `shutdown` resolves.
///
/// # Errors
///
/// Returns the error produced by `shutdown`, if any.
///
/// # Panics
///
/// Panics if the metaboard view cannot be serialized, before anything is
/// served.
pub async fn run_app_with<F>(dependencies: BootstrapDependencies, shutdown: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>> + Send,
{
    let metaboard = metaboard_view();
    info!(board = METABOARD_ID, fingerprint = %metaboard.fingerprint(), "metaboard view ready");

    let BootstrapDependencies {
        settings,
        config,
        telemetry,
    } = dependencies;

    info!(
        seed = ?settings.seed_path,
        allowed_origin = settings.allowed_origin.as_deref().unwrap_or("*"),
        boards = config.boards().len(),
        fingerprint = %config.client_view().fingerprint(),
        "configuration stores ready"
    );

    let forwarder = spawn_event_forwarder(config, telemetry);
    let result = shutdown.await;

    forwarder.abort();
    if let Err(err) = forwarder.await
        && !err.is_cancelled()
    {
        warn!(error = %err, "event forwarder join failed");
    }
    info!("shutdown complete");
    result
}

async fn shutdown_signal() -> AppResult<()> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|err| AppError::io("signal.ctrl_c", err))
}

fn spawn_event_forwarder(config: ConfigService, telemetry: Metrics) -> JoinHandle<()> {
    tokio::spawn(async move {
        // Replay from the start so seed-time publishes are counted too.
        let mut stream = config.subscribe(Some(0));
        while let Some(envelope) = stream.next().await {
            record_event(&envelope.event, &telemetry, config.configured_boards());
            debug!(
                event_id = envelope.id,
                kind = envelope.event.kind(),
                board = envelope.event.board().unwrap_or(""),
                "configuration event recorded"
            );
        }
    })
}

fn record_event(event: &ConfigEvent, telemetry: &Metrics, configured_boards: usize) {
    match event {
        ConfigEvent::GlobalPublished { .. } => telemetry.record_publish(PublishScope::Global),
        ConfigEvent::BoardPublished { .. } => telemetry.record_publish(PublishScope::Board),
        ConfigEvent::BoardRemoved { .. } => telemetry.record_board_removal(),
        ConfigEvent::BoardsReloaded { .. } => telemetry.record_publish(PublishScope::Boards),
    }
    telemetry.set_configured_boards(configured_boards);
}

fn validate_origin(origin: &str) -> AppResult<()> {
    let host = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
        .ok_or_else(|| AppError::InvalidConfig {
            field: "allowed_origin",
            reason: "unsupported_scheme",
            value: Some(origin.to_string()),
        })?;
    if host.is_empty() || host.contains('/') {
        return Err(AppError::InvalidConfig {
            field: "allowed_origin",
            reason: "invalid_host",
            value: Some(origin.to_string()),
        });
    }
    Ok(())
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_flag(name: &str) -> bool {
    env_flag_value(std::env::var(name).ok().as_deref())
}

fn env_flag_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}
