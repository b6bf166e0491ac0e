//! Default configuration values and input limits.
//!
//! # Design
//! - The process starts from these values until an administrator replaces them.
//! - Limits live here so validation and callers agree on them.

use std::collections::BTreeMap;

use crate::model::{BoardConfig, GlobalConfig, PublicConfig, Toggle};

/// Maximum length of a board identifier.
pub const MAX_LEN_BOARD_ID: usize = 10;
/// Maximum length of a board title.
pub const MAX_LEN_BOARD_TITLE: usize = 100;
/// Session lifetime in days.
pub const DEFAULT_SESSION_EXPIRY_DAYS: u32 = 30;
/// Theme served when no preference is set.
pub const DEFAULT_CSS: &str = "moe";
/// Language served when no preference is set.
pub const DEFAULT_LANG: &str = "en_GB";
/// Placeholder salt; deployments replace it on first configuration.
pub const DEFAULT_SALT: &str = "LALALALALALALALALALALALALALALALALALALALA";
/// Contact address used until one is configured.
pub const DEFAULT_FEEDBACK_EMAIL: &str = "admin@email.com";

/// Default answer set for the `#8ball` command.
pub const EIGHTBALL_DEFAULTS: [&str; 6] = [
    "Yes",
    "No",
    "Maybe",
    "It can't be helped",
    "Hell yeah, motherfucker!",
    "Anta baka?",
];

/// Default FAQ panel contents.
pub const DEFAULT_FAQ: &str = "Supported upload file types are JPEG, PNG, APNG, WEBM and MP3.
Encase words in ** to spoiler them. Spoilers reset on new line.
Boards that have not had any new posts in 7 days are automatically deleted.
<hr>Hash commands:
#d100 #2d100 - Roll dice
#flip - Coin flip
#8ball - An 8ball

All hash commands need to be input on their own line";

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            prune: Toggle(false),
            pyu: Toggle(false),
            max_width: 6000,
            max_height: 6000,
            max_threads: 100,
            max_bump: 1000,
            jpeg_quality: 80,
            png_quality: 20,
            max_size: 5,
            salt: DEFAULT_SALT.to_string(),
            feedback_email: DEFAULT_FEEDBACK_EMAIL.to_string(),
            captcha_private_key: String::new(),
            session_expiry: DEFAULT_SESSION_EXPIRY_DAYS,
            public: PublicConfig {
                default_css: DEFAULT_CSS.to_string(),
                default_lang: DEFAULT_LANG.to_string(),
                faq: DEFAULT_FAQ.to_string(),
                links: BTreeMap::from([(
                    "4chan".to_string(),
                    "http://www.4chan.org/".to_string(),
                )]),
                ..PublicConfig::default()
            },
        }
    }
}

impl BoardConfig {
    /// Fresh configuration for a new board with the default answer set.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            eightball: EIGHTBALL_DEFAULTS.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_defaults_match_documented_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.max_threads, 100);
        assert_eq!(config.max_bump, 1000);
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.png_quality, 20);
        assert_eq!(config.session_expiry, DEFAULT_SESSION_EXPIRY_DAYS);
        assert_eq!(config.public.default_css, DEFAULT_CSS);
        assert_eq!(
            config.public.links.get("4chan").map(String::as_str),
            Some("http://www.4chan.org/")
        );
    }

    #[test]
    fn new_board_uses_default_eightball() {
        let board = BoardConfig::new("a");
        assert_eq!(board.id, "a");
        assert_eq!(board.eightball.len(), EIGHTBALL_DEFAULTS.len());
        assert_eq!(board.eightball[0], "Yes");
        assert!(board.public.title.is_empty());
    }
}
