use std::time::Duration;

use kanban_app::{AppSettings, BootstrapDependencies, run_app_with};
use kanban_config::{ConfigFacade, ConfigSeed};
use kanban_test_support::fixtures::{sample_board, sample_global, write_seed};
use tokio::sync::oneshot;
use tokio::time::{sleep, timeout};

#[tokio::test]
async fn seeded_app_forwards_config_events_to_metrics() -> anyhow::Result<()> {
    let seed = ConfigSeed {
        global: Some(sample_global("seeded")),
        boards: vec![sample_board("a", "Foo")],
    };
    let file = write_seed(&seed)?;
    let settings = AppSettings::from_values(
        Some(file.path().display().to_string()),
        Some("https://example.org".to_string()),
        Some("json".to_string()),
        None,
        true,
    )?;

    let dependencies = BootstrapDependencies::load(settings).await?;
    let config = dependencies.config().clone();
    let metrics = dependencies.telemetry().clone();
    assert_eq!(config.global().salt, "seeded");
    assert_eq!(*config.boards(), vec!["a".to_string()]);

    let (stop, stopped) = oneshot::channel::<()>();
    let app = tokio::spawn(run_app_with(dependencies, async move {
        let _ = stopped.await;
        Ok(())
    }));

    config.create_board(sample_board("b", "Bar"))?;
    config.remove_board("a");

    timeout(Duration::from_secs(5), async {
        loop {
            let snapshot = metrics.snapshot();
            if snapshot.board_removals == 1 && snapshot.board_publishes == 1 {
                break;
            }
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await?;

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.global_publishes, 1);
    assert_eq!(snapshot.board_set_reloads, 1);
    assert_eq!(snapshot.configured_boards, 1);
    assert!(metrics.render()?.contains("config_publishes_total"));

    let _ = stop.send(());
    app.await??;
    Ok(())
}

#[tokio::test]
async fn missing_seed_file_fails_bootstrap() -> anyhow::Result<()> {
    let settings = AppSettings::from_values(
        Some("/nonexistent/kanban-seed.json".to_string()),
        None,
        None,
        None,
        false,
    )?;
    let Err(err) = BootstrapDependencies::load(settings).await else {
        anyhow::bail!("bootstrap should fail without a seed file");
    };
    assert!(matches!(
        err,
        kanban_app::AppError::Config {
            operation: "seed.load",
            ..
        }
    ));
    Ok(())
}
