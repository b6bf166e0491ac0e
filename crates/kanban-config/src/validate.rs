//! Validation applied on the administrative creation and seed paths.
//!
//! Plain store `set` calls never validate; their only failure mode is
//! serialization.

use std::collections::HashSet;

use crate::defaults::{MAX_LEN_BOARD_ID, MAX_LEN_BOARD_TITLE};
use crate::error::{ConfigError, ConfigResult};
use crate::metaboard::METABOARD_ID;
use crate::model::{BoardConfig, GlobalConfig};

/// Check that `id` is usable as a board identifier.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBoardId`] when the identifier is empty, too
/// long, contains anything but lowercase ASCII letters and digits, or is the
/// reserved metaboard identifier.
pub fn validate_board_id(id: &str) -> ConfigResult<()> {
    let reason = if id.is_empty() {
        Some("empty")
    } else if id.len() > MAX_LEN_BOARD_ID {
        Some("too_long")
    } else if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    {
        Some("invalid_characters")
    } else if id == METABOARD_ID {
        Some("reserved")
    } else {
        None
    };

    reason.map_or(Ok(()), |reason| {
        Err(ConfigError::InvalidBoardId {
            value: id.to_string(),
            reason,
        })
    })
}

/// Check a board configuration before it is created.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidBoardId`] for a bad identifier or
/// [`ConfigError::InvalidField`] for an over-long title.
pub fn validate_board_config(config: &BoardConfig) -> ConfigResult<()> {
    validate_board_id(&config.id)?;
    let title_len = config.public.title.chars().count();
    if title_len > MAX_LEN_BOARD_TITLE {
        return Err(ConfigError::InvalidField {
            section: "board",
            field: "title",
            value: Some(title_len.to_string()),
            reason: "too_long",
        });
    }
    Ok(())
}

/// Check every board in a bulk load and reject repeated identifiers.
///
/// # Errors
///
/// Returns the first per-board failure, or [`ConfigError::DuplicateBoard`]
/// when an identifier appears twice.
pub fn validate_board_set(configs: &[BoardConfig]) -> ConfigResult<()> {
    let mut seen = HashSet::with_capacity(configs.len());
    for config in configs {
        validate_board_config(config)?;
        if !seen.insert(config.id.as_str()) {
            return Err(ConfigError::DuplicateBoard {
                board: config.id.clone(),
            });
        }
    }
    Ok(())
}

/// Check global limits before they are seeded.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidField`] when a quality setting is outside
/// 1-100 or a size limit is zero.
pub fn validate_global(config: &GlobalConfig) -> ConfigResult<()> {
    for (field, quality) in [
        ("jpeg_quality", config.jpeg_quality),
        ("png_quality", config.png_quality),
    ] {
        if !(1..=100).contains(&quality) {
            return Err(invalid_global(field, quality.to_string(), "out_of_range"));
        }
    }

    let limits = [
        ("max_width", u64::from(config.max_width)),
        ("max_height", u64::from(config.max_height)),
        ("max_threads", u64::from(config.max_threads)),
        ("max_bump", u64::from(config.max_bump)),
        ("max_size", config.max_size),
    ];
    if let Some((field, value)) = limits.into_iter().find(|(_, value)| *value == 0) {
        return Err(invalid_global(field, value.to_string(), "must_be_positive"));
    }
    Ok(())
}

fn invalid_global(field: &'static str, value: String, reason: &'static str) -> ConfigError {
    ConfigError::InvalidField {
        section: "global",
        field,
        value: Some(value),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason_for(id: &str) -> Option<&'static str> {
        match validate_board_id(id) {
            Ok(()) => None,
            Err(ConfigError::InvalidBoardId { reason, .. }) => Some(reason),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn board_id_rules() {
        assert_eq!(reason_for("a"), None);
        assert_eq!(reason_for("g2"), None);
        assert_eq!(reason_for(""), Some("empty"));
        assert_eq!(reason_for("abcdefghijk"), Some("too_long"));
        assert_eq!(reason_for("A"), Some("invalid_characters"));
        assert_eq!(reason_for("a-b"), Some("invalid_characters"));
        assert_eq!(reason_for("ä"), Some("invalid_characters"));
        assert_eq!(reason_for(METABOARD_ID), Some("reserved"));
    }

    #[test]
    fn board_title_is_bounded() {
        let mut config = BoardConfig::new("a");
        config.public.title = "x".repeat(MAX_LEN_BOARD_TITLE);
        assert!(validate_board_config(&config).is_ok());

        config.public.title.push('x');
        let err = validate_board_config(&config).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidField {
                field: "title",
                reason: "too_long",
                ..
            }
        ));
    }

    #[test]
    fn board_set_rejects_duplicates() {
        let configs = vec![
            BoardConfig::new("a"),
            BoardConfig::new("b"),
            BoardConfig::new("a"),
        ];
        let err = validate_board_set(&configs).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateBoard { board } if board == "a"));
    }

    #[test]
    fn global_defaults_are_valid() {
        assert!(validate_global(&GlobalConfig::default()).is_ok());
    }

    #[test]
    fn global_quality_and_limits_are_checked() {
        let config = GlobalConfig {
            jpeg_quality: 0,
            ..GlobalConfig::default()
        };
        assert!(matches!(
            validate_global(&config).unwrap_err(),
            ConfigError::InvalidField {
                field: "jpeg_quality",
                ..
            }
        ));

        let config = GlobalConfig {
            png_quality: 101,
            ..GlobalConfig::default()
        };
        assert!(matches!(
            validate_global(&config).unwrap_err(),
            ConfigError::InvalidField {
                field: "png_quality",
                ..
            }
        ));

        let config = GlobalConfig {
            max_bump: 0,
            ..GlobalConfig::default()
        };
        assert!(matches!(
            validate_global(&config).unwrap_err(),
            ConfigError::InvalidField {
                field: "max_bump",
                reason: "must_be_positive",
                ..
            }
        ));
    }
}
