//! Constant public view of the aggregator metaboard.

use once_cell::sync::Lazy;

use crate::model::{BoardPublicConfig, PostParseConfigs, Toggle};
use crate::view::ClientView;

/// Identifier of the aggregator board. Reserved; never a real board.
pub const METABOARD_ID: &str = "all";

static METABOARD_VIEW: Lazy<ClientView> = Lazy::new(|| {
    ClientView::build("metaboard", &metaboard_public())
        .expect("metaboard public configuration is statically serializable")
});

/// Public configuration of the aggregator board.
#[must_use]
pub fn metaboard_public() -> BoardPublicConfig {
    BoardPublicConfig {
        post_parse: PostParseConfigs {
            hash_commands: Toggle(true),
            ..PostParseConfigs::default()
        },
        spoilers: Toggle(true),
        code_tags: Toggle(true),
        spoiler: "default.jpg".to_string(),
        title: "Aggregator metaboard".to_string(),
        banners: Vec::new(),
        ..BoardPublicConfig::default()
    }
}

/// Public JSON and fingerprint of the aggregator board, computed once.
///
/// # Panics
///
/// Panics on first use if the metaboard configuration cannot be serialized,
/// which indicates a build defect. Call this during startup so the process
/// fails before serving.
#[must_use]
pub fn metaboard_view() -> &'static ClientView {
    &METABOARD_VIEW
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Fingerprint;

    #[test]
    fn metaboard_view_is_computed_once() {
        let first = metaboard_view();
        let second = metaboard_view();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.fingerprint(), &Fingerprint::of(first.json()));
    }

    #[test]
    fn metaboard_enables_hash_commands_and_spoilers() {
        let value: serde_json::Value =
            serde_json::from_slice(metaboard_view().json()).expect("metaboard json parses");
        assert_eq!(value["title"], "Aggregator metaboard");
        assert_eq!(value["hashCommands"], true);
        assert_eq!(value["spoilers"], true);
        assert_eq!(value["codeTags"], true);
        assert_eq!(value["spoiler"], "default.jpg");
        assert_eq!(value["banners"], serde_json::json!([]));
    }
}
