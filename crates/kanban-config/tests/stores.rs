use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use kanban_config::{ConfigFacade, ConfigService, Fingerprint, GlobalConfig};
use kanban_test_support::assert::{assert_view_matches, assert_view_self_consistent};
use kanban_test_support::fixtures::{sample_board, sample_global};

const READERS: usize = 100;
const WRITES: usize = 1_000;

fn salted(i: usize) -> GlobalConfig {
    let mut config = sample_global(&format!("salt-{i}"));
    config.public.captcha_public_key = format!("key-{i}");
    config
}

#[test]
fn global_publish_is_atomic_under_concurrent_readers() {
    let service = ConfigService::with_defaults().expect("service builds");
    let mut allowed: HashSet<String> = (0..WRITES).map(|i| format!("salt-{i}")).collect();
    allowed.insert(GlobalConfig::default().salt);
    let writing = AtomicBool::new(true);

    thread::scope(|scope| {
        for _ in 0..READERS {
            scope.spawn(|| {
                loop {
                    let still_writing = writing.load(Ordering::Acquire);
                    let snapshot = service.global_snapshot();
                    let config = snapshot.config();
                    assert!(allowed.contains(&config.salt), "torn salt {}", config.salt);
                    assert_view_matches(snapshot.view(), &config.public);
                    if !config.salt.starts_with("salt-") {
                        assert!(config.public.captcha_public_key.is_empty());
                    } else {
                        assert_eq!(
                            config.salt.trim_start_matches("salt-"),
                            config.public.captcha_public_key.trim_start_matches("key-")
                        );
                    }
                    assert_view_self_consistent(&service.client_view());
                    if !still_writing {
                        break;
                    }
                }
            });
        }

        scope.spawn(|| {
            for i in 0..WRITES {
                service.set_global(salted(i)).expect("set succeeds");
            }
            writing.store(false, Ordering::Release);
        });
    });

    assert_eq!(service.global().salt, format!("salt-{}", WRITES - 1));
}

#[test]
fn removal_keeps_list_and_configs_coupled_for_racing_readers() {
    let service = ConfigService::with_defaults().expect("service builds");
    for id in ["a", "b", "c"] {
        service
            .create_board(sample_board(id, "Board"))
            .expect("create succeeds");
    }
    let removed = AtomicBool::new(false);

    thread::scope(|scope| {
        for _ in 0..16 {
            scope.spawn(|| {
                loop {
                    let after_removal = removed.load(Ordering::Acquire);
                    let listed = service.boards().iter().any(|id| id == "b");
                    let configured = service.board("b").is_configured();
                    if after_removal {
                        assert!(!listed, "removed board still listed");
                        assert!(!configured, "removed board still configured");
                        break;
                    }
                }
            });
        }

        scope.spawn(|| {
            service.remove_board("b");
            removed.store(true, Ordering::Release);
        });
    });

    assert_eq!(*service.boards(), vec!["a".to_string(), "c".to_string()]);
    assert!(service.unconfigured_boards().is_empty());
}

#[test]
fn removing_twice_matches_removing_once() {
    let service = ConfigService::with_defaults().expect("service builds");
    service
        .create_board(sample_board("a", "Foo"))
        .expect("create succeeds");
    service
        .create_board(sample_board("b", "Bar"))
        .expect("create succeeds");

    service.remove_board("a");
    let boards_once = service.boards();
    let entry_once = service.board("a");

    service.remove_board("a");
    assert_eq!(service.boards(), boards_once);
    assert_eq!(service.board("a"), entry_once);
    assert!(!entry_once.is_configured());
}

#[test]
fn unknown_board_is_the_empty_default() {
    let service = ConfigService::with_defaults().expect("service builds");
    let entry = service.board("nonexistent");
    assert_eq!(entry.id(), "");
    assert!(entry.json().is_empty());
    assert_eq!(entry.fingerprint(), &Fingerprint::default());
}

#[test]
fn listed_board_without_config_reads_as_default() {
    let service = ConfigService::with_defaults().expect("service builds");
    service.set_boards(vec!["a".to_string(), "b".to_string()]);
    service
        .set_board(sample_board("a", "Foo"))
        .expect("set succeeds");

    assert_eq!(service.board("a").config.public.title, "Foo");
    assert!(service.boards().iter().any(|id| id == "a"));
    assert!(!service.board("b").is_configured());
    assert_eq!(service.unconfigured_boards(), vec!["b".to_string()]);
}

#[test]
fn equal_public_configs_share_fingerprints() {
    let left = ConfigService::with_defaults().expect("service builds");
    let right = ConfigService::with_defaults().expect("service builds");
    assert_eq!(
        left.client_view().fingerprint(),
        right.client_view().fingerprint()
    );

    let mut changed = GlobalConfig::default();
    changed.public.mature = true.into();
    let moved = right.set_global(changed).expect("set succeeds");
    assert_ne!(left.client_view().fingerprint(), &moved);
}
