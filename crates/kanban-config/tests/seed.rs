use kanban_config::{ConfigError, ConfigFacade, ConfigSeed, ConfigService, load_seed};
use kanban_test_support::fixtures::{sample_board, sample_global, write_raw_seed, write_seed};

#[tokio::test]
async fn seed_file_populates_service() -> anyhow::Result<()> {
    let seed = ConfigSeed {
        global: Some(sample_global("seeded")),
        boards: vec![sample_board("a", "Foo"), sample_board("b", "Bar")],
    };
    let file = write_seed(&seed)?;

    let loaded = load_seed(file.path()).await?;
    let service = ConfigService::from_seed(loaded)?;

    assert_eq!(service.global().salt, "seeded");
    assert_eq!(*service.boards(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(service.board("b").config.public.title, "Bar");
    assert!(service.unconfigured_boards().is_empty());
    Ok(())
}

#[tokio::test]
async fn partial_seed_keeps_defaults() -> anyhow::Result<()> {
    let file = write_raw_seed(br#"{"boards":[{"id":"a","public":{"title":"Foo"}}]}"#)?;
    let seed = load_seed(file.path()).await?;
    assert!(seed.global.is_none());

    let service = ConfigService::from_seed(seed)?;
    assert_eq!(service.global().max_threads, 100);
    assert_eq!(service.board("a").config.public.title, "Foo");
    Ok(())
}

#[tokio::test]
async fn malformed_seed_is_a_parse_error() -> anyhow::Result<()> {
    let file = write_raw_seed(b"{ not json")?;
    let err = load_seed(file.path()).await.unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    Ok(())
}

#[tokio::test]
async fn seed_with_duplicate_boards_is_rejected() -> anyhow::Result<()> {
    let seed = ConfigSeed {
        global: None,
        boards: vec![sample_board("a", "Foo"), sample_board("a", "Bar")],
    };
    let file = write_seed(&seed)?;
    let err = load_seed(file.path()).await.unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateBoard { board } if board == "a"));
    Ok(())
}

#[tokio::test]
async fn seed_with_reserved_board_is_rejected() -> anyhow::Result<()> {
    let seed = ConfigSeed {
        global: None,
        boards: vec![sample_board(kanban_config::METABOARD_ID, "Meta")],
    };
    let file = write_seed(&seed)?;
    let err = load_seed(file.path()).await.unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidBoardId {
            reason: "reserved",
            ..
        }
    ));
    Ok(())
}
