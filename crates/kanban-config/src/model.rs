//! Typed configuration models.
//!
//! # Design
//! - Pure data carriers; each config owns a named public subset that is the
//!   only part ever serialized for clients.
//! - String-keyed maps are `BTreeMap` so serialized key order is stable.
//! - Values are replaced wholesale once published, never patched in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::view::{ClientView, Fingerprint};

/// Transparent wrapper for boolean feature toggles to avoid pedantic lint churn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(transparent)]
pub struct Toggle(pub bool);

impl Toggle {
    #[must_use]
    /// Whether the toggle is enabled.
    pub const fn is_enabled(self) -> bool {
        self.0
    }
}

impl From<bool> for Toggle {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl From<Toggle> for bool {
    fn from(toggle: Toggle) -> Self {
        toggle.0
    }
}

/// Server-wide administrative configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobalConfig {
    /// Delete boards that have been inactive for too long.
    pub prune: Toggle,
    /// Enable the pyu counter.
    pub pyu: Toggle,
    /// Maximum accepted image width in pixels.
    pub max_width: u16,
    /// Maximum accepted image height in pixels.
    pub max_height: u16,
    /// Maximum number of live threads per board.
    pub max_threads: u32,
    /// Reply count after which a thread stops bumping.
    pub max_bump: u32,
    /// JPEG thumbnail quality (1-100).
    pub jpeg_quality: u8,
    /// PNG thumbnail quality (1-100).
    pub png_quality: u8,
    /// Maximum upload size in megabytes.
    pub max_size: u64,
    /// Salt for hashing client identifiers.
    pub salt: String,
    /// Contact address shown on feedback pages.
    pub feedback_email: String,
    /// Private key of the captcha provider.
    pub captcha_private_key: String,
    /// Session lifetime in days.
    pub session_expiry: u32,
    /// Subset exposed to clients.
    pub public: PublicConfig,
}

/// Subset of [`GlobalConfig`] exposed through public availability APIs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PublicConfig {
    /// Show the radio banner.
    pub radio: Toggle,
    /// Enable hats.
    pub hats: Toggle,
    /// Enable the dance easter egg.
    pub illya_dance: Toggle,
    /// Require captchas on posting.
    pub captcha: Toggle,
    /// Serve an age confirmation prompt.
    pub mature: Toggle,
    /// Language served to clients without a preference.
    pub default_lang: String,
    /// Theme served to clients without a preference.
    #[serde(rename = "defaultCSS")]
    pub default_css: String,
    /// Public key of the captcha provider.
    pub captcha_public_key: String,
    /// FAQ panel contents.
    #[serde(rename = "FAQ")]
    pub faq: String,
    /// Link label to URL.
    pub links: BTreeMap<String, String>,
}

/// Board-specific administrative configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct BoardConfig {
    /// Board identifier. Immutable once the board is created.
    pub id: String,
    /// Answer set for the `#8ball` command, in display order.
    pub eightball: Vec<String>,
    /// Staff role to user identifiers.
    pub staff: BTreeMap<String, Vec<String>>,
    /// Subset exposed to clients.
    pub public: BoardPublicConfig,
}

/// Subset of [`BoardConfig`] exposed to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct BoardPublicConfig {
    /// Flags consumed by the post text parser.
    #[serde(flatten)]
    pub post_parse: PostParseConfigs,
    /// Allow spoilered images.
    pub spoilers: Toggle,
    /// Allow code tags in post bodies.
    pub code_tags: Toggle,
    /// Spoiler image file name.
    pub spoiler: String,
    /// Board title.
    pub title: String,
    /// Notice banner text.
    pub notice: String,
    /// Board rules text.
    pub rules: String,
    /// Banner image file names, in rotation order.
    pub banners: Vec<String>,
}

/// Board flags for post text parsing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct PostParseConfigs {
    /// Posting is disabled.
    pub read_only: Toggle,
    /// Uploads are disabled.
    pub text_only: Toggle,
    /// Names and tripcodes are stripped.
    pub forced_anon: Toggle,
    /// Hash commands such as `#flip` are evaluated.
    pub hash_commands: Toggle,
}

/// A board's configuration together with its precomputed public view.
///
/// The default value is what lookups of unknown boards return: an empty
/// identifier, empty JSON and an empty fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoardConfigEntry {
    /// Board configuration as last set.
    pub config: BoardConfig,
    /// Public JSON and fingerprint of `config.public`.
    pub view: ClientView,
}

impl BoardConfigEntry {
    /// Whether this entry belongs to a configured board.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.config.id.is_empty()
    }

    /// Board identifier; empty for unknown boards.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.config.id
    }

    /// Serialized public configuration.
    #[must_use]
    pub fn json(&self) -> &[u8] {
        self.view.json()
    }

    /// Fingerprint of [`Self::json`].
    #[must_use]
    pub const fn fingerprint(&self) -> &Fingerprint {
        self.view.fingerprint()
    }

    /// Post parsing flags for the board.
    #[must_use]
    pub const fn post_parse(&self) -> PostParseConfigs {
        self.config.public.post_parse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn toggle_serializes_as_plain_bool() {
        let value = serde_json::to_value(Toggle(true)).expect("toggle serializes");
        assert_eq!(value, json!(true));
        assert!(bool::from(Toggle::from(true)));
        assert!(!Toggle::default().is_enabled());
    }

    #[test]
    fn board_public_flattens_post_parse_flags() {
        let public = BoardPublicConfig {
            post_parse: PostParseConfigs {
                hash_commands: Toggle(true),
                ..PostParseConfigs::default()
            },
            title: "Animu".to_string(),
            ..BoardPublicConfig::default()
        };
        let value = serde_json::to_value(&public).expect("board public serializes");
        assert_eq!(value["hashCommands"], Value::Bool(true));
        assert_eq!(value["readOnly"], Value::Bool(false));
        assert_eq!(value["title"], json!("Animu"));
        assert!(value.get("postParse").is_none());
    }

    #[test]
    fn global_config_round_trips_every_field() {
        let mut config = GlobalConfig {
            prune: Toggle(true),
            max_width: 1920,
            salt: "pepper".to_string(),
            captcha_private_key: "private".to_string(),
            session_expiry: 7,
            ..GlobalConfig::default()
        };
        config.public.mature = Toggle(true);
        config
            .public
            .links
            .insert("home".to_string(), "https://example.org/".to_string());

        let encoded = serde_json::to_string(&config).expect("global serializes");
        let decoded: GlobalConfig = serde_json::from_str(&encoded).expect("global parses");
        assert_eq!(decoded, config);
    }

    #[test]
    fn board_config_deserializes_partial_documents() {
        let config: BoardConfig = serde_json::from_value(json!({
            "id": "a",
            "staff": { "owners": ["admin"] },
            "public": { "title": "Foo", "forcedAnon": true }
        }))
        .expect("partial board config parses");

        assert_eq!(config.id, "a");
        assert_eq!(config.public.title, "Foo");
        assert!(config.public.post_parse.forced_anon.is_enabled());
        assert!(config.eightball.is_empty());
        assert_eq!(config.staff["owners"], vec!["admin".to_string()]);
    }

    #[test]
    fn default_entry_is_unconfigured() {
        let entry = BoardConfigEntry::default();
        assert!(!entry.is_configured());
        assert_eq!(entry.id(), "");
        assert!(entry.json().is_empty());
        assert!(entry.fingerprint().is_empty());
    }
}
